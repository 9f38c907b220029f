use anyhow::{Context, Result};
use squat_coach_engine::PoseFrame;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Layout of a recorded frame file
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FrameFormat {
    /// Detect from the first non-whitespace character
    Auto,
    /// A single JSON array of frames
    Json,
    /// One JSON frame per line
    Jsonl,
}

/// Read recorded frames from a file, or from stdin when `path` is `-`
pub fn load_frames(path: &Path, format: FrameFormat) -> Result<Vec<PoseFrame>> {
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read frames from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read frame file {}", path.display()))?
    };

    let frames = parse_frames(&contents, format)?;
    tracing::debug!(count = frames.len(), "loaded pose frames");

    Ok(frames)
}

pub fn parse_frames(contents: &str, format: FrameFormat) -> Result<Vec<PoseFrame>> {
    let format = match format {
        FrameFormat::Auto if contents.trim_start().starts_with('[') => FrameFormat::Json,
        FrameFormat::Auto => FrameFormat::Jsonl,
        other => other,
    };

    match format {
        FrameFormat::Json => {
            serde_json::from_str(contents).context("Failed to parse JSON frame array")
        }
        _ => contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str(line)
                    .with_context(|| format!("Failed to parse frame on line {}", idx + 1))
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: &str =
        r#"{"timestampMs": 10, "poseScore": 0.9, "keypoints": [{"part": "nose", "x": 1.0, "y": 2.0, "confidence": 0.8}]}"#;

    #[test]
    fn test_parse_jsonl() {
        let contents = format!("{}\n\n{}\n", FRAME, FRAME);
        let frames = parse_frames(&contents, FrameFormat::Auto).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].timestamp_ms, 10);
    }

    #[test]
    fn test_parse_json_array() {
        let contents = format!("  [{}, {}]", FRAME, FRAME);
        let frames = parse_frames(&contents, FrameFormat::Auto).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].pose_score, 0.9);
    }

    #[test]
    fn test_bad_line_reports_line_number() {
        let contents = format!("{}\nnot json\n", FRAME);
        let err = parse_frames(&contents, FrameFormat::Jsonl).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_frames("", FrameFormat::Auto).unwrap().is_empty());
    }
}
