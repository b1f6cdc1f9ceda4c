//! # lineHeight Ratio Enrichment
//!
//! Attaches a unitless lineHeight / fontSize ratio to standalone
//! `…LineHeight` tokens that only carry an absolute length. Composite
//! typography styles, where both properties are bound together, are the
//! ground truth. Runs per Brand × Breakpoint cell:
//!
//! ```text
//! Stage 1  composite lineHeight binding id ──▶ ratio       (conflicts dropped)
//! Stage 2  token id / alias chain in that map ──▶ inherit  (symbolic tokens skipped)
//! Stage 3  xLineHeight + sibling xFontSize in the same file
//! Stage 4  literal lineHeight == composite lineHeight, unambiguous only (opt-out)
//! ```
//!
//! Tokens left without a ratio are kept and reported; generators fall back
//! to the absolute length.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{DiagnosticKind, Diagnostics, UnenrichedToken};
use crate::matrix::TokenSet;
use crate::model::*;

const LINE_HEIGHT_SUFFIX: &str = "lineheight";
const FONT_SIZE_SUFFIX: &str = "fontsize";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnrichOptions {
    /// Stage 4. Two unrelated fontSize/lineHeight pairs can share a literal
    /// lineHeight, so callers may switch it off.
    pub value_pattern: bool,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self { value_pattern: true }
    }
}

/// One identity dropped from a cell's Stage-1 map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioConflict {
    pub key: AxisKey,
    pub variable: VariableId,
    pub ratios: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentReport {
    pub identity: usize,
    pub name_pattern: usize,
    pub value_pattern: usize,
    /// Tokens left alone because they reference a symbolic endpoint.
    pub skipped_symbolic: usize,
    pub conflicts: Vec<RatioConflict>,
    pub unenriched: Vec<UnenrichedToken>,
}

impl EnrichmentReport {
    pub fn enriched(&self) -> usize {
        self.identity + self.name_pattern + self.value_pattern
    }
}

// ============================================================================
// Per-cell ground truth
// ============================================================================

/// Stage-1 identity map and Stage-4 value index for one cell.
#[derive(Debug, Default)]
struct CellTruth {
    by_identity: HashMap<VariableId, f64>,
    /// Literal lineHeight (in hundredths) → ratio, `None` when ambiguous.
    by_value: HashMap<i64, Option<f64>>,
}

fn value_key(lh: f64) -> i64 {
    (lh * 100.0).round() as i64
}

fn collect_truth(
    tokens: &TokenSet,
    key: &AxisKey,
    report: &mut EnrichmentReport,
    diags: &mut Diagnostics,
) -> CellTruth {
    let mut truth = CellTruth::default();
    let mut conflicted: HashMap<VariableId, Vec<f64>> = HashMap::new();
    let mut conflict_order: Vec<VariableId> = Vec::new();

    for style in tokens.typography_for(key) {
        let t = &style.typography;
        let Some(ratio) = t.line_height_ratio() else { continue };

        if let Some(lh) = t.line_height.value {
            truth
                .by_value
                .entry(value_key(lh))
                .and_modify(|slot| {
                    if *slot != Some(ratio) {
                        *slot = None;
                    }
                })
                .or_insert(Some(ratio));
        }

        let Some(id) = t.line_height.bound_variable() else { continue };
        if let Some(seen) = conflicted.get_mut(id) {
            if !seen.contains(&ratio) {
                seen.push(ratio);
            }
            continue;
        }
        match truth.by_identity.get(id) {
            None => {
                truth.by_identity.insert(id.clone(), ratio);
            }
            Some(&existing) if existing == ratio => {}
            Some(&existing) => {
                truth.by_identity.remove(id);
                conflicted.insert(id.clone(), vec![existing, ratio]);
                conflict_order.push(id.clone());
            }
        }
    }

    for id in conflict_order {
        let ratios = conflicted.remove(&id).unwrap_or_default();
        let listed = ratios.iter().map(f64::to_string).collect::<Vec<_>>().join(" vs ");
        diags.push(DiagnosticKind::RatioConflict, format!("[{key}] {id}"), listed);
        report.conflicts.push(RatioConflict { key: key.clone(), variable: id, ratios });
    }
    truth
}

// ============================================================================
// Pass
// ============================================================================

/// Stage 2: the token's own id first, then each hop of its alias chain.
fn identity_ratio(truth: &CellTruth, token: &ResolvedToken) -> Option<f64> {
    token.chain.iter().find_map(|id| truth.by_identity.get(id).copied())
}

fn is_line_height_token(token: &ResolvedToken) -> bool {
    token.var_type == VariableType::Float
        && token.leaf_name().to_ascii_lowercase().ends_with(LINE_HEIGHT_SUFFIX)
}

/// Stage 3 index: lowercase path with the `fontsize` suffix stripped →
/// resolved size, per file. `Component/Button/Primary/labelFontSize` keys as
/// `component/button/primary/label`, so same-leaf sub-scopes stay apart.
fn font_size_index(file: &TokenFile) -> HashMap<String, f64> {
    file.tokens
        .iter()
        .filter_map(|t| {
            let stem = path_stem(&t.path, FONT_SIZE_SUFFIX)?;
            t.value.as_float().map(|fs| (stem, fs))
        })
        .collect()
}

/// Lowercased path minus a lowercase leaf suffix.
fn path_stem(path: &str, suffix: &str) -> Option<String> {
    let lower = path.to_ascii_lowercase();
    if !crate::model::variable::leaf_of(&lower).ends_with(suffix) {
        return None;
    }
    Some(lower[..lower.len() - suffix.len()].to_owned())
}

/// Stage 3 sibling lookup: `…/fooLineHeight` → `…/fooFontSize` in the same file.
fn sibling_ratio(font_sizes: &HashMap<String, f64>, token: &ResolvedToken, lh: f64) -> Option<f64> {
    let stem = path_stem(&token.path, LINE_HEIGHT_SUFFIX)?;
    let fs = *font_sizes.get(&stem)?;
    (fs > 0.0).then(|| round_ratio(lh / fs))
}

/// Stages 2 to 4 in order; first hit wins.
fn find_ratio(
    truth: &CellTruth,
    font_sizes: &HashMap<String, f64>,
    token: &ResolvedToken,
    lh: f64,
    options: &EnrichOptions,
) -> Option<(f64, RatioSource)> {
    if let Some(r) = identity_ratio(truth, token) {
        return Some((r, RatioSource::Identity));
    }
    if let Some(r) = sibling_ratio(font_sizes, token, lh) {
        return Some((r, RatioSource::NamePattern));
    }
    if !options.value_pattern {
        return None;
    }
    truth
        .by_value
        .get(&value_key(lh))
        .copied()
        .flatten()
        .map(|r| (r, RatioSource::ValuePattern))
}

/// Run all stages over every Brand × Breakpoint cell.
///
/// Consumes the token set and returns the enriched copy; nothing else is
/// touched.
pub fn enrich(
    mut tokens: TokenSet,
    options: &EnrichOptions,
    diags: &mut Diagnostics,
) -> (TokenSet, EnrichmentReport) {
    let mut report = EnrichmentReport::default();

    for key in tokens.brand_breakpoint_keys() {
        let truth = collect_truth(&tokens, &key, &mut report, diags);

        for file in tokens.files.iter_mut().filter(|f| f.key == key) {
            let font_sizes = font_size_index(file);
            let scope = file.scope.clone();
            for token in file.tokens.iter_mut().filter(|t| is_line_height_token(t)) {
                if token.endpoint.as_ref().is_some_and(EndpointDescriptor::is_symbolic_layer) {
                    report.skipped_symbolic += 1;
                    continue;
                }
                let found = match token.value.as_float() {
                    Some(lh) => find_ratio(&truth, &font_sizes, token, lh, options),
                    None => None,
                };
                match found {
                    Some((ratio, source)) => {
                        match source {
                            RatioSource::Identity => report.identity += 1,
                            RatioSource::NamePattern => report.name_pattern += 1,
                            RatioSource::ValuePattern => report.value_pattern += 1,
                        }
                        token.line_height_ratio = Some(LineHeightRatio { ratio, source });
                    }
                    None => {
                        let detail = if token.value.is_resolved() {
                            "no composite, sibling, or unambiguous value match"
                        } else {
                            "lineHeight value itself is unresolved"
                        };
                        diags.push(
                            DiagnosticKind::UnresolvedEnrichment,
                            format!("[{key}] {}", token.path),
                            detail,
                        );
                        report.unenriched.push(UnenrichedToken {
                            key: key.clone(),
                            scope: scope.clone(),
                            path: token.path.clone(),
                        });
                    }
                }
            }
        }
    }

    tracing::debug!(
        identity = report.identity,
        name_pattern = report.name_pattern,
        value_pattern = report.value_pattern,
        skipped = report.skipped_symbolic,
        conflicts = report.conflicts.len(),
        unenriched = report.unenriched.len(),
        "lineHeight enrichment done"
    );
    (tokens, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key() -> AxisKey {
        AxisKey::brand_breakpoint("bild", "lg")
    }

    fn float(path: &str, id: &str, v: f64, chain: &[&str]) -> ResolvedToken {
        ResolvedToken {
            path: path.into(),
            variable: VariableId::from(id),
            var_type: VariableType::Float,
            value: Value::Float(v),
            chain: chain.iter().map(|c| VariableId::from(*c)).collect(),
            endpoint: None,
            line_height_ratio: None,
        }
    }

    fn style(name: &str, fs: f64, lh: f64, lh_var: Option<&str>) -> TypographyToken {
        let line_height = match lh_var {
            Some(id) => Property::bound(
                Some(lh),
                Binding { variable: VariableId::from(id), path: format!("Semantic/{id}"), endpoint: None },
            ),
            None => Property::literal(lh),
        };
        TypographyToken {
            key: key(),
            style_id: format!("S:{name}"),
            name: name.into(),
            typography: Typography { font_size: Property::literal(fs), line_height, ..Typography::default() },
        }
    }

    fn set(tokens: Vec<ResolvedToken>, styles: Vec<TypographyToken>) -> TokenSet {
        TokenSet {
            files: vec![TokenFile { key: key(), scope: "semantic".into(), tokens }],
            typography: styles,
            ..TokenSet::default()
        }
    }

    fn ratio_of(tokens: &TokenSet, path: &str) -> Option<LineHeightRatio> {
        tokens.file(&key(), "semantic")?.get(path)?.line_height_ratio
    }

    #[test]
    fn test_identity_through_chain() {
        let input = set(
            vec![float("Semantic/headlineLineHeight", "H", 40.0, &["H", "LH40"])],
            vec![style("Headline", 32.0, 40.0, Some("LH40"))],
        );
        let mut diags = Diagnostics::new();
        let (out, report) = enrich(input, &EnrichOptions::default(), &mut diags);

        assert_eq!(
            ratio_of(&out, "Semantic/headlineLineHeight"),
            Some(LineHeightRatio { ratio: 1.25, source: RatioSource::Identity })
        );
        assert_eq!(report.identity, 1);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_conflicting_identity_dropped() {
        let input = set(
            vec![float("Semantic/bodyLineHeight", "B", 24.0, &["B", "LH24"])],
            vec![style("Body", 20.0, 24.0, Some("LH24")), style("Caption", 18.46, 24.0, Some("LH24"))],
        );
        let mut diags = Diagnostics::new();
        let opts = EnrichOptions { value_pattern: false };
        let (out, report) = enrich(input, &opts, &mut diags);

        assert_eq!(ratio_of(&out, "Semantic/bodyLineHeight"), None);
        assert_eq!(report.conflicts.len(), 1);
        assert_eq!(report.conflicts[0].ratios, vec![1.2, 1.3]);
        assert_eq!(diags.count(DiagnosticKind::RatioConflict), 1);
        assert_eq!(report.unenriched.len(), 1);
        assert_eq!(report.unenriched[0].path, "Semantic/bodyLineHeight");
    }

    #[test]
    fn test_sibling_font_size() {
        let input = set(
            vec![
                float("Semantic/quoteFontSize", "QF", 20.0, &["QF"]),
                float("Semantic/quoteLineHeight", "QL", 30.0, &["QL"]),
            ],
            vec![],
        );
        let mut diags = Diagnostics::new();
        let (out, report) = enrich(input, &EnrichOptions::default(), &mut diags);

        assert_eq!(
            ratio_of(&out, "Semantic/quoteLineHeight"),
            Some(LineHeightRatio { ratio: 1.5, source: RatioSource::NamePattern })
        );
        assert_eq!(report.name_pattern, 1);
        assert_eq!(ratio_of(&out, "Semantic/quoteFontSize"), None);
    }

    #[test]
    fn test_sibling_pairs_within_sub_scope() {
        let input = set(
            vec![
                float("Component/Button/Primary/labelFontSize", "PF", 20.0, &["PF"]),
                float("Component/Button/Primary/labelLineHeight", "PL", 30.0, &["PL"]),
                float("Component/Button/Secondary/labelFontSize", "SF", 10.0, &["SF"]),
                float("Component/Button/Secondary/labelLineHeight", "SL", 12.0, &["SL"]),
            ],
            vec![],
        );
        let mut diags = Diagnostics::new();
        let (out, report) = enrich(input, &EnrichOptions::default(), &mut diags);

        assert_eq!(
            ratio_of(&out, "Component/Button/Primary/labelLineHeight"),
            Some(LineHeightRatio { ratio: 1.5, source: RatioSource::NamePattern })
        );
        assert_eq!(
            ratio_of(&out, "Component/Button/Secondary/labelLineHeight"),
            Some(LineHeightRatio { ratio: 1.2, source: RatioSource::NamePattern })
        );
        assert_eq!(report.name_pattern, 2);
    }

    #[test]
    fn test_unresolved_line_height_reported() {
        let mut token = float("Semantic/brokenLineHeight", "BR", 0.0, &["BR", "GONE"]);
        token.value = Value::Unresolved(Unresolved::MissingVariable);
        let input = set(vec![token], vec![style("Headline", 32.0, 40.0, None)]);
        let mut diags = Diagnostics::new();
        let (out, report) = enrich(input, &EnrichOptions::default(), &mut diags);

        assert_eq!(ratio_of(&out, "Semantic/brokenLineHeight"), None);
        assert_eq!(report.unenriched.len(), 1);
        assert_eq!(report.unenriched[0].path, "Semantic/brokenLineHeight");
        let entry = diags.of_kind(DiagnosticKind::UnresolvedEnrichment).next().unwrap();
        assert!(entry.detail.contains("unresolved"));
    }

    #[test]
    fn test_value_pattern_unambiguous_only() {
        let input = set(
            vec![
                float("Semantic/kickerLineHeight", "K", 28.0, &["K"]),
                float("Semantic/labelLineHeight", "L", 20.0, &["L"]),
            ],
            vec![
                style("Teaser", 20.0, 28.0, None),
                style("Small", 16.0, 20.0, None),
                style("Tiny", 10.0, 20.0, None),
            ],
        );
        let mut diags = Diagnostics::new();
        let (out, report) = enrich(input.clone(), &EnrichOptions::default(), &mut diags);

        assert_eq!(
            ratio_of(&out, "Semantic/kickerLineHeight"),
            Some(LineHeightRatio { ratio: 1.4, source: RatioSource::ValuePattern })
        );
        assert_eq!(ratio_of(&out, "Semantic/labelLineHeight"), None);
        assert_eq!(report.value_pattern, 1);
        assert_eq!(diags.count(DiagnosticKind::UnresolvedEnrichment), 1);

        let mut diags = Diagnostics::new();
        let (out, report) = enrich(input, &EnrichOptions { value_pattern: false }, &mut diags);
        assert_eq!(ratio_of(&out, "Semantic/kickerLineHeight"), None);
        assert_eq!(report.enriched(), 0);
        assert_eq!(report.unenriched.len(), 2);
    }

    #[test]
    fn test_symbolic_endpoint_skipped() {
        let mut token = float("Component/Button/labelLineHeight", "BL", 40.0, &["BL", "LH40"]);
        token.endpoint = Some(EndpointDescriptor {
            kind: CollectionKind::Semantic(Axis::Breakpoint),
            variable: VariableId::from("SEM"),
            path: "Typography/bodyLineHeight".into(),
            leaf: "bodyLineHeight".into(),
        });
        let input = set(vec![token], vec![style("Headline", 32.0, 40.0, Some("LH40"))]);
        let mut diags = Diagnostics::new();
        let (out, report) = enrich(input, &EnrichOptions::default(), &mut diags);

        assert_eq!(ratio_of(&out, "Component/Button/labelLineHeight"), None);
        assert_eq!(report.skipped_symbolic, 1);
        assert!(report.unenriched.is_empty());
    }

    #[test]
    fn test_non_line_height_tokens_untouched() {
        let input = set(vec![float("Semantic/gap", "G", 8.0, &["G"])], vec![]);
        let mut diags = Diagnostics::new();
        let (out, report) = enrich(input.clone(), &EnrichOptions::default(), &mut diags);
        assert_eq!(out, input);
        assert_eq!(report, EnrichmentReport::default());
    }
}
