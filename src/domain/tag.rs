use crate::domain::version::SemanticVersion;
use crate::report::Reporter;

/// Picks the latest semantic-version tag out of a repository's tag names.
///
/// Names that do not parse as [`SemanticVersion`] are skipped, so release
/// tags can live next to arbitrary ones (`build-42`, `deployed`, ...).
pub struct TagResolver<'a> {
    reporter: &'a dyn Reporter,
}

impl<'a> TagResolver<'a> {
    pub fn new(reporter: &'a dyn Reporter) -> Self {
        TagResolver { reporter }
    }

    /// Return the name of the tag with the greatest `(major, minor, patch)`.
    ///
    /// The prerelease label is not part of the ranking, so `1.2.0-rc1` and
    /// `1.2.0` tie; ties go to whichever came first in `tag_names`. The
    /// winning name is returned as given, prefix and label intact.
    ///
    /// Returns `None` both when `tag_names` is empty and when none of them
    /// parse.
    ///
    /// # Example
    /// ```
    /// # use semtagger::domain::TagResolver;
    /// # use semtagger::report::MemoryReporter;
    /// let reporter = MemoryReporter::new();
    /// let latest = TagResolver::new(&reporter)
    ///     .resolve_latest(&["v1.0.0", "v1.2.0", "v1.1.9", "notsemver"]);
    /// assert_eq!(latest.as_deref(), Some("v1.2.0"));
    /// ```
    pub fn resolve_latest<S: AsRef<str>>(&self, tag_names: &[S]) -> Option<String> {
        if tag_names.is_empty() {
            self.reporter.info("No tags found in repository");
            return None;
        }

        self.reporter
            .debug(&format!("Found {} total tags", tag_names.len()));

        let mut candidates: Vec<(&str, SemanticVersion)> = tag_names
            .iter()
            .map(|name| name.as_ref())
            .filter_map(|name| match SemanticVersion::parse(name) {
                Ok(version) => {
                    self.reporter
                        .debug(&format!("Valid semantic version tag: {}", name));
                    Some((name, version))
                }
                Err(_) => {
                    self.reporter
                        .debug(&format!("Skipping non-semantic tag: {}", name));
                    None
                }
            })
            .collect();

        if candidates.is_empty() {
            self.reporter.info("No semantic version tags found");
            return None;
        }

        // Stable: equal keys keep input order
        candidates.sort_by(|(_, a), (_, b)| b.ranking_key().cmp(&a.ranking_key()));

        let latest = candidates[0].0.to_string();
        self.reporter.info(&format!("Latest tag: {}", latest));
        Some(latest)
    }
}
