//! Dimension Rules
//!
//! Rules look at decoded dimensions and produce structured violations.
//! Turning a violation into console output is the manifest validator's job.

use serde::Serialize;

use crate::png::ImageDimensions;

pub const BACKGROUND_WIDTH: u32 = 1920;
pub const BACKGROUND_HEIGHT: u32 = 1080;
pub const ICON_MIN: u32 = 64;
pub const ICON_MAX: u32 = 512;
pub const RECOMMENDED_ICON: u32 = 256;

/// True iff both components match exactly.
pub fn validate_exact(dims: ImageDimensions, expected_width: u32, expected_height: u32) -> bool {
    dims.width == expected_width && dims.height == expected_height
}

/// True iff the icon is square and each side lies in `min..=max`.
pub fn validate_icon(dims: ImageDimensions, min: u32, max: u32) -> bool {
    IconRule { min, max }.issues(dims).is_clean()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionViolation {
    pub rule: &'static str,
    pub actual: ImageDimensions,
    pub expected: String,
    /// Every condition that applies, in a fixed order.
    pub issues: Vec<String>,
}

/// Rule trait - produces at most one violation per image
pub trait DimensionRule {
    fn name(&self) -> &'static str;
    fn check(&self, dims: ImageDimensions) -> Option<DimensionViolation>;
    /// Fix instructions; `display_path` is quoted into the example command.
    fn remediation(&self, display_path: &str) -> Vec<String>;
}

// --- Concrete Rules ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactRule {
    pub width: u32,
    pub height: u32,
}

impl ExactRule {
    pub const BACKGROUND: ExactRule = ExactRule {
        width: BACKGROUND_WIDTH,
        height: BACKGROUND_HEIGHT,
    };
}

impl DimensionRule for ExactRule {
    fn name(&self) -> &'static str { "exact_size" }

    fn check(&self, dims: ImageDimensions) -> Option<DimensionViolation> {
        if validate_exact(dims, self.width, self.height) {
            return None;
        }

        Some(DimensionViolation {
            rule: self.name(),
            actual: dims,
            expected: format!("{}x{}", self.width, self.height),
            issues: vec![],
        })
    }

    fn remediation(&self, display_path: &str) -> Vec<String> {
        let (w, h) = (self.width, self.height);
        vec![
            format!("How to fix: Resize/crop the image to exactly {w}x{h}."),
            String::new(),
            "Example (ImageMagick):".to_string(),
            format!(
                "  magick \"{display_path}\" -resize {w}x{h}^ -gravity center -extent {w}x{h} \"{display_path}\""
            ),
            String::new(),
            "Or recreate/export the background from your editor at the required resolution.".to_string(),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconRule {
    pub min: u32,
    pub max: u32,
}

impl IconRule {
    pub const DEFAULT: IconRule = IconRule { min: ICON_MIN, max: ICON_MAX };

    pub fn issues(&self, dims: ImageDimensions) -> IconIssues {
        IconIssues {
            not_square: dims.width != dims.height,
            too_small: dims.width < self.min || dims.height < self.min,
            too_large: dims.width > self.max || dims.height > self.max,
        }
    }
}

impl Default for IconRule {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Independent icon conditions; any combination may hold at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IconIssues {
    pub not_square: bool,
    pub too_small: bool,
    pub too_large: bool,
}

impl IconIssues {
    pub fn is_clean(&self) -> bool {
        !(self.not_square || self.too_small || self.too_large)
    }
}

impl DimensionRule for IconRule {
    fn name(&self) -> &'static str { "square_range" }

    fn check(&self, dims: ImageDimensions) -> Option<DimensionViolation> {
        let found = self.issues(dims);
        if found.is_clean() {
            return None;
        }

        let mut issues = vec![];
        if found.not_square {
            issues.push("Issue: Icon is not square.".to_string());
        }
        if found.too_small {
            issues.push(format!("Issue: Icon is smaller than {0}x{0}.", self.min));
        }
        if found.too_large {
            issues.push(format!("Issue: Icon is larger than {0}x{0}.", self.max));
        }

        Some(DimensionViolation {
            rule: self.name(),
            actual: dims,
            expected: format!(
                "square between {0}x{0} and {1}x{1}",
                self.min, self.max
            ),
            issues,
        })
    }

    fn remediation(&self, display_path: &str) -> Vec<String> {
        let size = if (self.min..=self.max).contains(&RECOMMENDED_ICON) {
            RECOMMENDED_ICON
        } else {
            self.max
        };
        vec![
            format!(
                "How to fix: Create a square PNG and resize it to a recommended size (e.g. {size}x{size})."
            ),
            String::new(),
            "Example (ImageMagick):".to_string(),
            format!(
                "  magick \"{display_path}\" -resize {size}x{size}^ -gravity center -extent {size}x{size} \"{display_path}\""
            ),
            String::new(),
            format!(
                "Or open your source image in an editor and export a square PNG between {} and {} pixels.",
                self.min, self.max
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(width: u32, height: u32) -> ImageDimensions {
        ImageDimensions { width, height }
    }

    #[test]
    fn test_exact_match_and_perturbations() {
        assert!(validate_exact(dims(1920, 1080), 1920, 1080));

        for (w, h) in [(1919, 1080), (1921, 1080), (1920, 1079), (1920, 1081), (1080, 1920)] {
            assert!(!validate_exact(dims(w, h), 1920, 1080), "{w}x{h} should fail");
        }
    }

    #[test]
    fn test_exact_rule_violation_carries_values() {
        let violation = ExactRule::BACKGROUND.check(dims(1000, 1000)).unwrap();
        assert_eq!(violation.rule, "exact_size");
        assert_eq!(violation.actual, dims(1000, 1000));
        assert_eq!(violation.expected, "1920x1080");

        assert!(ExactRule::BACKGROUND.check(dims(1920, 1080)).is_none());
    }

    #[test]
    fn test_icon_boundary_table() {
        let table = [
            ((64, 64), true),
            ((63, 63), false),
            ((512, 512), true),
            ((513, 513), false),
            ((100, 200), false),
            ((64, 512), false),
            ((256, 256), true),
        ];

        for ((w, h), expected) in table {
            assert_eq!(validate_icon(dims(w, h), ICON_MIN, ICON_MAX), expected, "{w}x{h}");
        }
    }

    #[test]
    fn test_icon_issues_are_independent() {
        let rule = IconRule::DEFAULT;

        assert_eq!(
            rule.issues(dims(63, 63)),
            IconIssues { not_square: false, too_small: true, too_large: false }
        );
        assert_eq!(
            rule.issues(dims(513, 513)),
            IconIssues { not_square: false, too_small: false, too_large: true }
        );
        assert_eq!(
            rule.issues(dims(64, 512)),
            IconIssues { not_square: true, too_small: false, too_large: false }
        );
        assert_eq!(
            rule.issues(dims(10, 1000)),
            IconIssues { not_square: true, too_small: true, too_large: true }
        );
    }

    #[test]
    fn test_icon_violation_lists_every_issue() {
        let violation = IconRule::DEFAULT.check(dims(32, 600)).unwrap();
        assert_eq!(violation.issues.len(), 3);
        assert_eq!(violation.issues[0], "Issue: Icon is not square.");
        assert!(violation.issues[1].contains("smaller than 64x64"));
        assert!(violation.issues[2].contains("larger than 512x512"));
        assert_eq!(violation.expected, "square between 64x64 and 512x512");
    }

    #[test]
    fn test_remediation_quotes_path() {
        let lines = ExactRule::BACKGROUND.remediation("servers/foo/bg.png");
        assert!(lines.iter().any(|l| l.contains(
            "magick \"servers/foo/bg.png\" -resize 1920x1080^ -gravity center -extent 1920x1080"
        )));

        let lines = IconRule::DEFAULT.remediation("icon.png");
        assert!(lines.iter().any(|l| l.contains("-extent 256x256 \"icon.png\"")));
    }
}
