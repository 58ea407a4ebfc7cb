//! Block-glyph sparklines and gradient tiers.

pub const GLYPHS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Only the most recent points are drawn.
pub const MAX_POINTS: usize = 30;

/// Colour band for a value relative to its maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Low,
    Mid,
    High,
}

pub fn tier(ratio: f64) -> Tier {
    if ratio < 0.33 {
        Tier::Low
    } else if ratio < 0.66 {
        Tier::Mid
    } else {
        Tier::High
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub glyph: char,
    pub tier: Tier,
}

/// Glyph index for `value` scaled against `max`.
pub fn level(value: i64, max: i64) -> usize {
    if max <= 0 || value <= 0 {
        return 0;
    }
    ((value * 8 / max) as usize).min(8)
}

/// Render a series (most recent last) as sparkline points.
pub fn sparkline(values: &[i64]) -> Vec<Point> {
    let values = &values[values.len().saturating_sub(MAX_POINTS)..];
    let max = values.iter().copied().max().unwrap_or(0);

    values
        .iter()
        .map(|&v| {
            if max <= 0 {
                return Point {
                    glyph: GLYPHS[1],
                    tier: Tier::Low,
                };
            }
            Point {
                glyph: GLYPHS[level(v, max)],
                tier: tier(v as f64 / max as f64),
            }
        })
        .collect()
}

/// Filled cell count and tier for a percentage bar of `width` cells.
pub fn bar(percent: f64, width: usize) -> (usize, Tier) {
    let percent = percent.clamp(0.0, 100.0);
    let filled = ((percent / 100.0) * width as f64) as usize;
    (filled.min(width), tier(percent / 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyphs(points: &[Point]) -> String {
        points.iter().map(|p| p.glyph).collect()
    }

    #[test]
    fn test_levels() {
        assert_eq!(level(0, 10), 0);
        assert_eq!(level(10, 10), 8);
        assert_eq!(level(5, 10), 4);
        assert_eq!(level(1, 10), 0);
        assert_eq!(level(3, 0), 0);
    }

    #[test]
    fn test_sparkline_glyphs_and_tiers() {
        let points = sparkline(&[0, 2, 4, 8]);
        assert_eq!(glyphs(&points), " ▂▄█");
        assert_eq!(points[1].tier, Tier::Low);
        assert_eq!(points[2].tier, Tier::Mid);
        assert_eq!(points[3].tier, Tier::High);
    }

    #[test]
    fn test_all_zero_series_is_flat() {
        assert_eq!(glyphs(&sparkline(&[0, 0, 0])), "▁▁▁");
        assert!(sparkline(&[]).is_empty());
    }

    #[test]
    fn test_caps_to_recent_points() {
        let series: Vec<i64> = (0..45).collect();
        let points = sparkline(&series);
        assert_eq!(points.len(), MAX_POINTS);
        assert_eq!(points.last().map(|p| p.glyph), Some('█'));
    }

    #[test]
    fn test_bar() {
        assert_eq!(bar(0.0, 10), (0, Tier::Low));
        assert_eq!(bar(50.0, 10), (5, Tier::Mid));
        assert_eq!(bar(250.0, 10), (10, Tier::High));
    }
}
