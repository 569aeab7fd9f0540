use crate::types::Color;

/// Branding injected into the engine per call site. A value, not a global:
/// two documents with different branding can render concurrently without
/// sharing mutable state.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Brand color for the title block and table header bands.
    pub brand: Color,
    /// Accent for header/footer rules.
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub stripe_even: Color,
    pub stripe_odd: Color,
    pub summary_band: Color,
    /// Fixed 4-slot dashboard palette, left to right.
    pub kpi: [Color; 4],
    /// Cycled per label for pie/doughnut wedges and per series for bars.
    pub chart_palette: Vec<Color>,
    /// Left-aligned footer line stamped on every page.
    pub footer_line: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            brand: Color::from_rgb8(0x1B, 0x4F, 0x72),
            accent: Color::from_rgb8(0x2E, 0x86, 0xC1),
            text: Color::from_rgb8(0x1C, 0x28, 0x33),
            muted: Color::from_rgb8(0x70, 0x7B, 0x7C),
            stripe_even: Color::from_rgb8(0xF4, 0xF6, 0xF7),
            stripe_odd: Color::from_rgb8(0xE5, 0xE8, 0xE8),
            summary_band: Color::from_rgb8(0xD6, 0xEA, 0xF8),
            kpi: [
                Color::from_rgb8(0x2E, 0x86, 0xC1),
                Color::from_rgb8(0xC0, 0x39, 0x2B),
                Color::from_rgb8(0x1E, 0x84, 0x49),
                Color::from_rgb8(0xB9, 0x77, 0x0E),
            ],
            chart_palette: vec![
                Color::from_rgb8(0x2E, 0x86, 0xC1),
                Color::from_rgb8(0x1E, 0x84, 0x49),
                Color::from_rgb8(0xC0, 0x39, 0x2B),
                Color::from_rgb8(0xB9, 0x77, 0x0E),
                Color::from_rgb8(0x6C, 0x34, 0x83),
                Color::from_rgb8(0x14, 0x8F, 0x77),
                Color::from_rgb8(0xA0, 0x40, 0x00),
                Color::from_rgb8(0x5D, 0x6D, 0x7E),
            ],
            footer_line: "Strata Management Platform".to_string(),
        }
    }
}

impl Theme {
    /// Announcement priority labels carry a signal color.
    pub fn priority_color(&self, priority: &str) -> Color {
        match priority.to_ascii_lowercase().as_str() {
            "high" | "urgent" => self.kpi[1],
            "low" => self.muted,
            _ => self.kpi[0],
        }
    }

    /// Meeting/request status bands.
    pub fn status_color(&self, status: &str) -> Color {
        match status.to_ascii_lowercase().as_str() {
            "completed" | "done" | "closed" => self.kpi[2],
            "cancelled" | "canceled" => self.kpi[1],
            "in_progress" | "in progress" => self.kpi[3],
            _ => self.kpi[0],
        }
    }

    pub fn palette_color(&self, index: usize) -> Color {
        if self.chart_palette.is_empty() {
            return self.brand;
        }
        self.chart_palette[index % self.chart_palette.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles() {
        let theme = Theme::default();
        let n = theme.chart_palette.len();
        assert_eq!(theme.palette_color(0), theme.palette_color(n));
    }

    #[test]
    fn priority_colors_distinguish_high_from_normal() {
        let theme = Theme::default();
        assert_ne!(theme.priority_color("high"), theme.priority_color("normal"));
        assert_eq!(theme.priority_color("URGENT"), theme.priority_color("high"));
    }
}
