use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;

use tracing::{debug, trace, warn};
use weft_keys::KeyCodec;
use weft_ledger::LedgerRead;
use weft_refs::{Reference, ReferenceParser};
use weft_types::{KeyFormat, OperatorId, StorageKey};

use crate::error::{ResolveError, ResolveResult};
use crate::reader::{ReadOptions, RecordReader};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Tuning for one resolver instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Ceiling on recursion depth: the longest reference chain that will
    /// be followed from the root. A wide graph of siblings at one depth
    /// is fine; a chain longer than this is cut off.
    pub max_depth: usize,
    /// When set, a reference whose target cannot be fetched is left
    /// unresolved (and cited) instead of failing the whole call.
    pub best_effort: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            max_depth: 8,
            best_effort: false,
        }
    }
}

/// Why a reference was left unresolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// The target was already visited during this call — a cycle, or a
    /// repeated target in a diamond-shaped graph.
    CycleDetected,
    /// The depth budget was exhausted before reaching the target.
    DepthExceeded,
    /// Fetching the target failed (best-effort mode only).
    FetchFailed,
}

/// A reference the resolver left in place, with where and why.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnresolvedRef {
    /// Key text as written in the content.
    pub key: String,
    /// Operator the reference targeted.
    pub operator: OperatorId,
    /// Hops from the root content at which the reference was found.
    pub depth: usize,
    pub reason: UnresolvedReason,
}

/// The output of a resolve call.
///
/// Unresolved references keep their original text inside `content`; the
/// `unresolved` report cites each one, so callers can distinguish real
/// content from markers without re-parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedContent {
    pub content: String,
    pub unresolved: Vec<UnresolvedRef>,
}

impl ResolvedContent {
    /// Returns `true` when every reachable reference was inlined.
    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Per-call resolution state.
///
/// Owned exclusively by one top-level resolve call: created on entry,
/// threaded through every recursive step, discarded on return. The
/// visited set is never reset per branch — sharing it across the whole
/// call is what breaks cycles and collapses diamond graphs to one fetch
/// per target.
struct ResolutionContext {
    visited: HashSet<(StorageKey, OperatorId)>,
    remaining_depth: usize,
    unresolved: Vec<UnresolvedRef>,
}

impl ResolutionContext {
    fn new(max_depth: usize) -> Self {
        Self {
            visited: HashSet::new(),
            remaining_depth: max_depth,
            unresolved: Vec::new(),
        }
    }

    fn cite(&mut self, key: String, operator: OperatorId, depth: usize, reason: UnresolvedReason) {
        self.unresolved.push(UnresolvedRef {
            key,
            operator,
            depth,
            reason,
        });
    }
}

/// Depth-bounded, cycle-safe recursive reference resolver.
///
/// Walks the reference graph embedded in record content in document
/// order, inlining each reachable target's fully resolved content. The
/// depth budget is the only guaranteed termination bound and is enforced
/// here, independent of any timeout a caller may wrap around the ledger.
pub struct Resolver<L> {
    reader: RecordReader<L>,
    options: ResolveOptions,
}

impl<L: LedgerRead> Resolver<L> {
    /// Create a resolver with default options.
    pub fn new(reader: RecordReader<L>) -> Self {
        Self {
            reader,
            options: ResolveOptions::default(),
        }
    }

    /// Override the resolve options.
    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    /// The underlying record reader.
    pub fn reader(&self) -> &RecordReader<L> {
        &self.reader
    }

    /// Fetch a root record and resolve its content fully.
    ///
    /// The root itself is marked visited before descent, so a record that
    /// references itself is detected without a second fetch.
    pub async fn resolve_record(
        &self,
        key: &StorageKey,
        operator: &OperatorId,
    ) -> ResolveResult<ResolvedContent> {
        let record = self
            .reader
            .read(key, operator, &ReadOptions::router())
            .await
            .map_err(|source| ResolveError::Fetch {
                key: key.to_hex(),
                operator: operator.clone(),
                depth: 0,
                source,
            })?;
        let content = String::from_utf8(record.value).map_err(|_| ResolveError::InvalidUtf8 {
            key: key.to_hex(),
            operator: operator.clone(),
            depth: 0,
        })?;

        let mut ctx = ResolutionContext::new(self.options.max_depth);
        ctx.visited.insert((*key, operator.clone()));
        let content = self.resolve_level(content, operator.clone(), &mut ctx).await?;
        Ok(ResolvedContent {
            content,
            unresolved: ctx.unresolved,
        })
    }

    /// Resolve already-fetched content.
    ///
    /// `operator` is the identity the content was written under; it is
    /// inherited by references that do not name an operator of their own.
    pub async fn resolve_content(
        &self,
        content: &str,
        operator: &OperatorId,
    ) -> ResolveResult<ResolvedContent> {
        let mut ctx = ResolutionContext::new(self.options.max_depth);
        let content = self
            .resolve_level(content.to_string(), operator.clone(), &mut ctx)
            .await?;
        Ok(ResolvedContent {
            content,
            unresolved: ctx.unresolved,
        })
    }

    /// Resolve one level of content: parse its references, resolve each
    /// in document order, and rebuild the content with replacements
    /// spliced at the original spans.
    ///
    /// The rebuild is a single left-to-right sweep against spans computed
    /// on the original string, so an earlier replacement's length never
    /// shifts a later span.
    fn resolve_level<'a>(
        &'a self,
        content: String,
        operator: OperatorId,
        ctx: &'a mut ResolutionContext,
    ) -> BoxFuture<'a, ResolveResult<String>> {
        Box::pin(async move {
            if !ReferenceParser::contains_references(&content) {
                return Ok(content);
            }
            let references = ReferenceParser::parse_references(&content);
            if references.is_empty() {
                // Marker present but malformed: plain content.
                return Ok(content);
            }

            let mut rebuilt = String::with_capacity(content.len());
            let mut cursor = 0;
            for reference in &references {
                rebuilt.push_str(&content[cursor..reference.span.start]);
                let replacement = self
                    .resolve_reference(reference, &content, &operator, ctx)
                    .await?;
                rebuilt.push_str(&replacement);
                cursor = reference.span.end;
            }
            rebuilt.push_str(&content[cursor..]);
            Ok(rebuilt)
        })
    }

    /// Resolve a single reference to its replacement text.
    ///
    /// Returns the target's fully resolved content, or the reference's
    /// original text when it is cyclic, out of budget, or (in best-effort
    /// mode) failed to fetch.
    async fn resolve_reference(
        &self,
        reference: &Reference,
        content: &str,
        inherited: &OperatorId,
        ctx: &mut ResolutionContext,
    ) -> ResolveResult<String> {
        let depth = self.options.max_depth - ctx.remaining_depth;
        let target_operator = reference.target_operator(inherited).clone();
        let original = reference.original_text(content);

        let target_key = match KeyCodec::encode(&reference.key, KeyFormat::Raw) {
            Ok(key) => key,
            Err(source) => {
                if self.options.best_effort {
                    warn!(key = %reference.key, depth, error = %source, "unencodable reference key; leaving unresolved");
                    ctx.cite(
                        reference.key.clone(),
                        target_operator,
                        depth,
                        UnresolvedReason::FetchFailed,
                    );
                    return Ok(original.to_string());
                }
                return Err(ResolveError::InvalidReferenceKey {
                    key: reference.key.clone(),
                    depth,
                    source,
                });
            }
        };

        if ctx.visited.contains(&(target_key, target_operator.clone())) {
            debug!(key = %reference.key, operator = %target_operator, depth, "reference target already visited; leaving unresolved");
            ctx.cite(
                reference.key.clone(),
                target_operator,
                depth,
                UnresolvedReason::CycleDetected,
            );
            return Ok(original.to_string());
        }

        if ctx.remaining_depth == 0 {
            debug!(key = %reference.key, depth, "depth budget exhausted; leaving reference unresolved");
            ctx.cite(
                reference.key.clone(),
                target_operator,
                depth,
                UnresolvedReason::DepthExceeded,
            );
            return Ok(original.to_string());
        }

        trace!(key = %reference.key, operator = %target_operator, depth, "fetching reference target");
        let record = match self
            .reader
            .read(&target_key, &target_operator, &ReadOptions::router())
            .await
        {
            Ok(record) => record,
            Err(source) => {
                if self.options.best_effort {
                    warn!(key = %reference.key, depth, error = %source, "reference fetch failed; leaving unresolved");
                    ctx.cite(
                        reference.key.clone(),
                        target_operator,
                        depth,
                        UnresolvedReason::FetchFailed,
                    );
                    return Ok(original.to_string());
                }
                return Err(ResolveError::Fetch {
                    key: reference.key.clone(),
                    operator: target_operator,
                    depth,
                    source,
                });
            }
        };

        let target_content = match String::from_utf8(record.value) {
            Ok(text) => text,
            Err(_) => {
                if self.options.best_effort {
                    warn!(key = %reference.key, depth, "reference target is not UTF-8; leaving unresolved");
                    ctx.cite(
                        reference.key.clone(),
                        target_operator,
                        depth,
                        UnresolvedReason::FetchFailed,
                    );
                    return Ok(original.to_string());
                }
                return Err(ResolveError::InvalidUtf8 {
                    key: reference.key.clone(),
                    operator: target_operator,
                    depth,
                });
            }
        };

        // Mark visited before descending so nothing below this point can
        // re-enter the same target.
        ctx.visited.insert((target_key, target_operator.clone()));
        ctx.remaining_depth -= 1;
        let resolved = self
            .resolve_level(target_content, target_operator, ctx)
            .await;
        ctx.remaining_depth += 1;
        resolved
    }
}
