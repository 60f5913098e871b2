use crate::enhancer::EnhanceParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct EnhanceToolConfig {
    #[serde(rename = "input")]
    pub input: PathBuf,
    /// Colour images are enhanced through their value channel unless `gray`.
    #[serde(default)]
    pub mode: ChannelMode,
    #[serde(default)]
    pub params: EnhanceParams,
    pub output: EnhanceOutputConfig,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelMode {
    #[default]
    Color,
    Gray,
}

#[derive(Debug, Deserialize)]
pub struct EnhanceOutputConfig {
    /// Enhanced image; format follows the extension.
    pub image: PathBuf,
    /// Optional JSON dump of the enhancement report.
    #[serde(default)]
    pub report_json: Option<PathBuf>,
    /// Optional line graph of the final curve.
    #[serde(default)]
    pub curve_plot: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<EnhanceToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg: EnhanceToolConfig =
            serde_json::from_str(r#"{ "input": "in.png", "output": { "image": "out.png" } }"#)
                .unwrap();
        assert_eq!(cfg.mode, ChannelMode::Color);
        assert_eq!(cfg.params, EnhanceParams::default());
        assert!(cfg.output.report_json.is_none());
        assert!(cfg.output.curve_plot.is_none());
    }

    #[test]
    fn full_config_parses() {
        let cfg: EnhanceToolConfig = serde_json::from_str(
            r#"{
                "input": "in.png",
                "mode": "gray",
                "params": { "threshold": 20, "blend_weight": 0.5 },
                "output": {
                    "image": "out/enhanced.png",
                    "report_json": "out/report.json",
                    "curve_plot": "out/curve.png"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.mode, ChannelMode::Gray);
        assert_eq!(cfg.params.threshold, 20);
        assert_eq!(cfg.params.blend_weight, 0.5);
        assert_eq!(cfg.params.sigmas, [3.0, 1.0, 0.5]);
        assert_eq!(
            cfg.output.curve_plot.as_deref(),
            Some(Path::new("out/curve.png"))
        );
    }
}
