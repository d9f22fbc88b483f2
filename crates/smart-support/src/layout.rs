//! Presentation skins for the verification page.
//!
//! Purely cosmetic: both layouts show the same header, form and trust
//! indicators, only arranged differently.

use std::fmt::{self, Write};

use smart_support_common::Field;

use crate::form::FormSnapshot;

/// Viewport width (px) from which the wide layout is used
pub const WIDE_BREAKPOINT: u32 = 1024;

/// Page heading
pub const TITLE: &str = "Verify Your Identity";
/// Line under the heading
pub const TAGLINE: &str =
    "We're here to assist you and ensure you get the right solution as quickly as possible.";
/// Alt text of the hero image
pub const IMAGE_ALT: &str = "Smart Support verification";
/// Reassurances listed under the form
pub const TRUST_INDICATORS: [&str; 3] = [
    "Your information is secure and encrypted",
    "Fast and seamless verification process",
    "24/7 customer support available",
];

const LEFT_COLUMN: usize = 34;

/// Which skin to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Two columns: image left, header/form/indicators right
    Wide,
    /// Single stacked column: header, image, form, indicators
    Narrow,
}

impl Layout {
    /// Pick the skin for a viewport width in pixels
    pub fn for_width(px: u32) -> Self {
        if px >= WIDE_BREAKPOINT {
            Layout::Wide
        } else {
            Layout::Narrow
        }
    }

    /// Draw the page around the given form state
    pub fn render(&self, form: &FormSnapshot, out: &mut impl Write) -> fmt::Result {
        match self {
            Layout::Narrow => {
                for line in header()
                    .into_iter()
                    .chain(image())
                    .chain(form_card(form))
                    .chain(trust())
                {
                    writeln!(out, "{line}")?;
                }
                Ok(())
            }
            Layout::Wide => {
                let left = image();
                let right: Vec<String> = header()
                    .into_iter()
                    .chain(form_card(form))
                    .chain(trust())
                    .collect();
                let rows = left.len().max(right.len());
                for i in 0..rows {
                    let l = left.get(i).map(String::as_str).unwrap_or("");
                    let r = right.get(i).map(String::as_str).unwrap_or("");
                    writeln!(out, "{:<width$}  {}", l, r, width = LEFT_COLUMN)?;
                }
                Ok(())
            }
        }
    }
}

fn header() -> Vec<String> {
    vec![
        "[lock]".to_owned(),
        TITLE.to_owned(),
        TAGLINE.to_owned(),
        String::new(),
    ]
}

fn image() -> Vec<String> {
    let inner = LEFT_COLUMN - 2;
    let mut lines = vec![format!("+{}+", "-".repeat(inner))];
    lines.push(format!("|{:^inner$}|", "", inner = inner));
    lines.push(format!("|{:^inner$}|", IMAGE_ALT, inner = inner));
    lines.push(format!("|{:^inner$}|", "", inner = inner));
    lines.push(format!("+{}+", "-".repeat(inner)));
    lines
}

fn form_card(form: &FormSnapshot) -> Vec<String> {
    let mut lines = Vec::new();
    for field in Field::ALL {
        lines.push(field.label().to_owned());
        let value = form.value(field);
        let shown = if value.is_empty() {
            format!("<{}>", field.placeholder())
        } else {
            value.to_owned()
        };
        let lock = if form.processing { " (disabled)" } else { "" };
        lines.push(format!("  [{shown}]{lock}"));
        if let Some(err) = form.errors.get(field) {
            lines.push(format!("  ! {err}"));
        }
    }
    if let Some(banner) = &form.submit_error {
        lines.push(format!("!! {banner}"));
    }
    lines.push(format!("( {} )", form.submit_label()));
    lines.push(String::new());
    lines
}

fn trust() -> Vec<String> {
    TRUST_INDICATORS.iter().map(|t| format!("✓ {t}")).collect()
}
