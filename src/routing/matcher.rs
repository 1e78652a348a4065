//! Script-alias matching.
//!
//! # Responsibilities
//! - Recognise `/cgi-bin/...` requests
//! - Split off the part of the URI below the script directory
//!
//! # Design Decisions
//! - `cgi-bin/` only counts directly after the URI's leading slashes
//! - Matching is case-sensitive, like the rest of the URI path

/// Directory name that marks script requests.
pub const SCRIPT_DIR: &str = "cgi-bin";

const SCRIPT_DIR_SLASH: &str = "cgi-bin/";

/// Matches URIs of the form `/cgi-bin/...`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptAliasMatcher;

impl ScriptAliasMatcher {
    /// The URI below the script directory, starting with `/`, when `uri`
    /// is a script request.
    pub fn match_uri<'a>(&self, uri: &'a str) -> Option<&'a str> {
        let pos = uri.find(SCRIPT_DIR_SLASH)?;
        let leading = uri.len() - uri.trim_start_matches('/').len();
        if pos != leading {
            return None;
        }
        Some(&uri[pos + SCRIPT_DIR.len()..])
    }
}

/// True when `cgi-bin/` appears anywhere in the URI.
pub fn mentions_script_dir(uri: &str) -> bool {
    uri.contains(SCRIPT_DIR_SLASH)
}
