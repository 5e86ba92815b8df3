//! Plain-text rendering of the Internals view.
//!
//! Used for headless output and for the panel's "Copy" button.

use crate::internals::view::{InternalsView, SectionBody, SectionView, NO_DATA_PLACEHOLDER};

/// Render both sections, separated by a blank line.
pub fn render_text(view: &InternalsView) -> String {
    let mut out = String::new();
    for (i, section) in view.sections().into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        render_section(&mut out, section);
    }
    out
}

fn render_section(out: &mut String, section: &SectionView) {
    out.push_str(section.title);
    out.push('\n');
    match &section.body {
        SectionBody::Empty => {
            out.push_str(NO_DATA_PLACEHOLDER);
            out.push('\n');
        }
        SectionBody::Groups(groups) => {
            for group in groups {
                out.push_str(&group.label);
                out.push_str(":\n");
                for item in &group.items {
                    out.push_str("  ");
                    out.push_str(&item.text());
                    out.push('\n');
                }
            }
        }
    }
}
