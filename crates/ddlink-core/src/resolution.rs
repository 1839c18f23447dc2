use std::fmt::Display;

/// The outcome of resolving a single link.
///
/// Every variant carries a usable link; the tag records how much work
/// actually succeeded so callers do not have to re-derive it from the link's
/// shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The debrid service produced a direct download link.
    Unlocked(String),
    /// A redirector was escaped but the resulting link was not unlocked.
    Resolved(String),
    /// Best-effort passthrough of the (cleaned) input.
    Passthrough(String),
}

impl Resolution {
    /// Returns the link carried by this resolution.
    pub fn link(&self) -> &str {
        match self {
            Resolution::Unlocked(link)
            | Resolution::Resolved(link)
            | Resolution::Passthrough(link) => link,
        }
    }

    /// Consumes the resolution and returns its link.
    pub fn into_link(self) -> String {
        match self {
            Resolution::Unlocked(link)
            | Resolution::Resolved(link)
            | Resolution::Passthrough(link) => link,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        matches!(self, Resolution::Unlocked(_))
    }

    /// A short, stable name for the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Resolution::Unlocked(_) => "unlocked",
            Resolution::Resolved(_) => "resolved",
            Resolution::Passthrough(_) => "passthrough",
        }
    }
}

impl Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.link())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let r = Resolution::Unlocked("https://cdn.example/real".to_string());
        assert!(r.is_unlocked());
        assert_eq!(r.kind(), "unlocked");
        assert_eq!(r.link(), "https://cdn.example/real");
        assert_eq!(r.to_string(), "https://cdn.example/real");
        assert_eq!(r.into_link(), "https://cdn.example/real");

        let r = Resolution::Passthrough("https://dl-protect.link/abc".to_string());
        assert!(!r.is_unlocked());
        assert_eq!(r.kind(), "passthrough");
        assert_eq!(Resolution::Resolved(String::new()).kind(), "resolved");
    }
}
