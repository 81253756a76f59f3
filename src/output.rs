// src/output.rs
use bitflags::bitflags;

use crate::stats::Summary;

bitflags! {
    /// Which statistics go on the result line
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OutputFields: u8 {
        const MEAN = 1 << 0;
        const STD  = 1 << 1;
        const CI   = 1 << 2;
    }
}

/// Format `value` with exactly two decimals (`nan`, `inf` and `-inf` for
/// the non-finite cases).
pub fn fixed2(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "inf" } else { "-inf" }.to_string()
    } else {
        format!("{:.2}", value)
    }
}

/// Render the result line: the selected fields in the fixed order mean,
/// standard deviation, interval, separated by single spaces. No selected
/// field means all of them.
pub fn format_summary(summary: &Summary, fields: OutputFields) -> String {
    let fields = if fields.is_empty() {
        OutputFields::all()
    } else {
        fields
    };

    let mut parts = Vec::with_capacity(3);
    if fields.contains(OutputFields::MEAN) {
        parts.push(fixed2(summary.mean));
    }
    if fields.contains(OutputFields::STD) {
        parts.push(fixed2(summary.std_dev));
    }
    if fields.contains(OutputFields::CI) {
        parts.push(format!("{},{}", fixed2(summary.ci_low), fixed2(summary.ci_high)));
    }
    parts.join(" ")
}
