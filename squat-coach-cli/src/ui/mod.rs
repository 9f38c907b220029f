// Plain terminal rendering for replay output

use colored::{ColoredString, Colorize};
use squat_coach_engine::{EngineSnapshot, SessionSummary, Severity};

fn paint(text: &str, severity: Severity, color: bool) -> String {
    if !color {
        return text.to_string();
    }

    let styled: ColoredString = match severity {
        Severity::Success => text.green(),
        Severity::Warning => text.yellow(),
        Severity::Info => text.cyan(),
    };
    styled.to_string()
}

/// One line per tick
pub fn format_snapshot(snapshot: &EngineSnapshot, color: bool) -> String {
    let angles = match snapshot.angles {
        Some(angles) => format!(
            "knee {:>5.1}° hip {:>5.1}°",
            angles.knee_angle_deg, angles.hip_angle_deg
        ),
        None => format!("{:<22}", "no angles"),
    };

    let mut line = format!(
        "[{:>8} ms] {:<12} {} | good {} bad {} | {:>4} | {}",
        snapshot.timestamp_ms,
        snapshot.state.to_string(),
        angles,
        snapshot.counters.good_reps,
        snapshot.counters.bad_reps,
        snapshot.accuracy.to_string(),
        paint(&snapshot.feedback.text, snapshot.feedback.severity, color),
    );

    if let Some(rep) = snapshot.rep {
        let marker = format!("  <- rep {}", rep);
        let severity = if rep.is_good() {
            Severity::Success
        } else {
            Severity::Warning
        };
        line.push_str(&paint(&marker, severity, color));
    }

    line
}

pub fn format_summary(summary: &SessionSummary, color: bool) -> String {
    let title = if color {
        "Session Summary".bold().to_string()
    } else {
        "Session Summary".to_string()
    };

    [
        title,
        "────────────────────────────────".to_string(),
        format!("Good reps:        {}", summary.good_reps),
        format!("Bad reps:         {}", summary.bad_reps),
        format!("Total reps:       {}", summary.total_reps),
        format!("Final accuracy:   {}", summary.final_accuracy),
        format!("Frames processed: {}", summary.frames_processed),
        format!("Frames rejected:  {}", summary.frames_rejected),
    ]
    .join("\n")
}
