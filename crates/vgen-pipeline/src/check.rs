//! Environment check.
//!
//! Reports tool and credential availability before a run. Required items
//! block the pipeline; optional ones only reduce functionality (fallback
//! topics, placeholder images, no tracking).

use std::fmt::Write as _;
use std::path::Path;

/// One checked item.
#[derive(Debug, Clone)]
pub struct CheckItem {
    pub name: &'static str,
    pub ok: bool,
    pub required: bool,
    pub detail: String,
}

fn env_check(name: &'static str, required: bool, purpose: &str) -> CheckItem {
    let set = std::env::var(name).map(|v| !v.is_empty()).unwrap_or(false);
    CheckItem {
        name,
        ok: set,
        required,
        detail: if set {
            "configured".to_string()
        } else {
            format!("not set ({})", purpose)
        },
    }
}

fn tool_check(name: &'static str) -> CheckItem {
    match which::which(name) {
        Ok(path) => CheckItem {
            name,
            ok: true,
            required: true,
            detail: path.display().to_string(),
        },
        Err(_) => CheckItem {
            name,
            ok: false,
            required: true,
            detail: "not found in PATH".to_string(),
        },
    }
}

/// Run all checks.
pub fn run_checks() -> Vec<CheckItem> {
    let mut items = vec![tool_check("ffmpeg"), tool_check("ffprobe")];

    items.push(env_check("GEMINI_API_KEY", true, "script generation"));

    let mut creds = env_check(
        "GOOGLE_APPLICATION_CREDENTIALS",
        true,
        "Drive, Sheets and TTS auth",
    );
    if creds.ok {
        let path = std::env::var("GOOGLE_APPLICATION_CREDENTIALS").unwrap_or_default();
        if !Path::new(&path).exists() {
            creds.ok = false;
            creds.detail = format!("file not found: {}", path);
        }
    }
    items.push(creds);

    items.push(env_check("DRIVE_FOLDER_ID", false, "upload destination folder"));
    items.push(env_check("SHEETS_TRACKING_ID", false, "pipeline tracking sheet"));
    items.push(env_check("YOUTUBE_API_KEY", false, "live trend discovery"));
    items.push(env_check("UNSPLASH_API_KEY", false, "stock images"));
    items.push(env_check("PEXELS_API_KEY", false, "stock images fallback"));

    items
}

/// Whether every required item passed.
pub fn all_required_ok(items: &[CheckItem]) -> bool {
    items.iter().filter(|i| i.required).all(|i| i.ok)
}

/// Render the check report.
pub fn report(items: &[CheckItem]) -> String {
    let mut out = String::from("Environment check\n\n");
    for item in items {
        let mark = if item.ok { "ok " } else if item.required { "MISSING" } else { "-- " };
        let _ = writeln!(
            out,
            "  [{}] {:<32} {}{}",
            mark,
            item.name,
            item.detail,
            if item.required { "" } else { " (optional)" },
        );
    }
    if all_required_ok(items) {
        out.push_str("\nAll required items configured.\n");
    } else {
        out.push_str("\nRequired items missing - the pipeline cannot run.\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checks_cover_tools_and_keys() {
        let items = run_checks();
        let names: Vec<&str> = items.iter().map(|i| i.name).collect();
        assert!(names.contains(&"ffmpeg"));
        assert!(names.contains(&"ffprobe"));
        assert!(names.contains(&"GEMINI_API_KEY"));
        assert!(names.contains(&"UNSPLASH_API_KEY"));
    }

    #[test]
    fn test_optional_items_do_not_block() {
        let items = vec![
            CheckItem {
                name: "ffmpeg",
                ok: true,
                required: true,
                detail: String::new(),
            },
            CheckItem {
                name: "PEXELS_API_KEY",
                ok: false,
                required: false,
                detail: String::new(),
            },
        ];
        assert!(all_required_ok(&items));
    }

    #[test]
    fn test_report_marks_missing_required() {
        let items = vec![CheckItem {
            name: "ffmpeg",
            ok: false,
            required: true,
            detail: "not found in PATH".into(),
        }];
        let report = report(&items);
        assert!(report.contains("MISSING"));
        assert!(report.contains("cannot run"));
    }
}
