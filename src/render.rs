//! Pure text construction for the rules document and pointer files.
//!
//! No I/O happens here. Both renderers are total over their inputs, which
//! keeps them unit-testable without a filesystem and guarantees that
//! identical inputs produce byte-identical output.

use crate::model::IndexStats;

/// Shared body written into every shadow pointer file.
///
/// Contains [`crate::config::RULES_POINTER_PATH`]: that substring is what
/// lets later passes detect an already-synced file instead of appending
/// again.
const POINTER_TEXT: &str = "\
# AI Assistant Rules

Canonical rules and code-graph statistics for this repository live in
`.store/RULES.md`. That file is regenerated on every indexing pass; read it
at the start of a session instead of duplicating guidance here.
";

/// Render the canonical rules document for one indexing pass.
///
/// Substitutes the project name and each count into a fixed Markdown
/// template. Counts render verbatim; zero-defaulting for absent fields
/// happens at the [`IndexStats`] level.
#[must_use]
pub fn render_rules_document(project_name: &str, stats: &IndexStats) -> String {
    format!(
        "# {project_name} - Code Intelligence Rules\n\
         \n\
         This document is regenerated on every indexing pass. Treat it as\n\
         read-only: manual edits are overwritten by the next pass.\n\
         \n\
         ## Index snapshot\n\
         \n\
         - Files: {files}\n\
         - Symbols: {symbols}\n\
         - Relationships: {relationships}\n\
         - Clusters: {clusters}\n\
         - Data flows: {flows}\n\
         \n\
         ## Working with this codebase\n\
         \n\
         - Query the code graph before proposing cross-module changes; the\n\
           relationship counts above show how connected the code is.\n\
         - Prefer the clusters reported by the index over ad-hoc groupings\n\
           when navigating unfamiliar areas.\n\
         - Record architectural decisions in the project's own docs, not in\n\
           this generated file.\n",
        files = stats.files,
        symbols = stats.symbols,
        relationships = stats.relationships,
        clusters = stats.clusters,
        flows = stats.flows,
    )
}

/// Fixed pointer text shared by every shadow file.
///
/// Constant for the process lifetime; takes no parameters.
#[must_use]
pub const fn pointer_text() -> &'static str {
    POINTER_TEXT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RULES_POINTER_PATH;

    #[test]
    fn test_all_counts_default_to_zero() {
        let doc = render_rules_document("Foo", &IndexStats::default());
        assert!(doc.contains("# Foo - Code Intelligence Rules"));
        assert!(doc.contains("- Files: 0"));
        assert!(doc.contains("- Symbols: 0"));
        assert!(doc.contains("- Relationships: 0"));
        assert!(doc.contains("- Clusters: 0"));
        assert!(doc.contains("- Data flows: 0"));
    }

    #[test]
    fn test_counts_render_verbatim() {
        let stats = IndexStats {
            files: 10,
            symbols: 50,
            relationships: -3,
            ..IndexStats::default()
        };
        let doc = render_rules_document("Demo", &stats);
        assert!(doc.contains("- Files: 10"));
        assert!(doc.contains("- Symbols: 50"));
        // Negative counts are not validated; they pass through as-is.
        assert!(doc.contains("- Relationships: -3"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let stats = IndexStats {
            files: 7,
            ..IndexStats::default()
        };
        assert_eq!(
            render_rules_document("Demo", &stats),
            render_rules_document("Demo", &stats)
        );
    }

    #[test]
    fn test_pointer_text_contains_marker() {
        assert!(pointer_text().contains(RULES_POINTER_PATH));
    }
}
