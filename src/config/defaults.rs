//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn url() -> Option<String> {
        None
    }

    pub fn author() -> String {
        "<YOUR_NAME>".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn content() -> PathBuf {
        "content".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub mod feed {
        use std::path::PathBuf;

        pub fn json_path() -> PathBuf {
            "feed.json".into()
        }

        pub fn rss_path() -> PathBuf {
            "feed.xml".into()
        }
    }
}

// ============================================================================
// [[collections]] Defaults
// ============================================================================

pub mod collection {
    pub fn content_type() -> String {
        "page".into()
    }

    pub fn includes() -> Vec<String> {
        vec!["*.toml".into()]
    }

    pub fn routes() -> Vec<String> {
        vec![String::new()]
    }

    pub fn archive_template() -> String {
        "archive.html".into()
    }

    pub fn sort_by() -> String {
        "date_published".into()
    }
}
