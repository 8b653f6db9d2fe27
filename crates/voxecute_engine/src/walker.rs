//! Lazy, pull-driven chain evaluation.
//!
//! [`ChainWalker`] visits the same tree as [`Evaluator::run`](crate::Evaluator::run)
//! in the same order, but one step per pull. Each subcommand is applied only
//! when the walk reaches it, against the world passed to that pull, so the
//! caller may change the world between steps.

use std::collections::VecDeque;

use rand_chacha::ChaCha8Rng;
use tracing::trace;
use voxecute_foundation::Result;
use voxecute_storage::WorldAccess;

use crate::chain::Chain;
use crate::context::Context;
use crate::eval::apply_step;
use crate::subcommand::Subcommand;

/// One pull of a [`ChainWalker`].
#[derive(Clone, Debug, PartialEq)]
pub struct Step<'c> {
    /// The produced context, or `None` when `subcommand` yielded nothing.
    pub context: Option<Context>,
    /// The subcommand that produced this step; `None` only for an empty chain.
    pub subcommand: Option<&'c Subcommand>,
    /// Index of `subcommand` in the chain.
    pub index: usize,
    /// True for contexts that finished the chain and for empty results.
    pub is_final: bool,
    /// True on the last step of the walk.
    pub is_last: bool,
}

/// Unvisited results of one subcommand application.
#[derive(Debug)]
struct Frame {
    index: usize,
    children: VecDeque<Context>,
}

/// A depth-first walk over a chain with an explicit stack.
///
/// Yields final contexts, intermediate contexts produced by forks, and one
/// empty step whenever a fork or guard drops its branch. Dropping the walker
/// abandons the walk.
#[derive(Debug)]
pub struct ChainWalker<'c> {
    chain: &'c Chain,
    stack: Vec<Frame>,
    pending: Option<(Context, usize)>,
    rng: ChaCha8Rng,
}

impl<'c> ChainWalker<'c> {
    /// Starts a walk of `chain` from `root`.
    #[must_use]
    pub fn new(chain: &'c Chain, root: Context, rng: ChaCha8Rng) -> Self {
        Self {
            chain,
            stack: Vec::new(),
            pending: Some((root, 0)),
            rng,
        }
    }

    /// True once the walk has nothing more to yield.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.pending.is_none() && self.stack.is_empty()
    }

    /// Advances the walk by one step.
    ///
    /// Returns `None` when the walk is over. An error ends the walk.
    pub fn step<W: WorldAccess + ?Sized>(&mut self, world: &W) -> Option<Result<Step<'c>>> {
        loop {
            if let Some((ctx, index)) = self.pending.take() {
                let Some(sub) = self.chain.get(index) else {
                    // only reachable for an empty chain
                    return Some(Ok(Step {
                        context: Some(ctx),
                        subcommand: None,
                        index,
                        is_final: true,
                        is_last: self.stack.is_empty(),
                    }));
                };
                match apply_step(sub, index, &ctx, world, &mut self.rng) {
                    Err(err) => {
                        self.stack.clear();
                        return Some(Err(err));
                    }
                    Ok(children) if children.is_empty() => {
                        trace!(index, subcommand = %sub, "branch pruned");
                        return Some(Ok(Step {
                            context: None,
                            subcommand: Some(sub),
                            index,
                            is_final: true,
                            is_last: self.stack.is_empty(),
                        }));
                    }
                    Ok(children) => self.stack.push(Frame {
                        index,
                        children: children.into(),
                    }),
                }
            }

            let frame = self.stack.last_mut()?;
            let index = frame.index;
            let next = frame.children.pop_front();
            if frame.children.is_empty() {
                self.stack.pop();
            }
            let Some(ctx) = next else {
                continue;
            };
            let Some(sub) = self.chain.get(index) else {
                continue;
            };

            if index + 1 == self.chain.len() {
                return Some(Ok(Step {
                    context: Some(ctx),
                    subcommand: Some(sub),
                    index,
                    is_final: true,
                    is_last: self.stack.is_empty(),
                }));
            }
            if sub.is_fork() {
                self.pending = Some((ctx.clone(), index + 1));
                return Some(Ok(Step {
                    context: Some(ctx),
                    subcommand: Some(sub),
                    index,
                    is_final: false,
                    is_last: false,
                }));
            }
            self.pending = Some((ctx, index + 1));
        }
    }

    /// Borrows the walker as an iterator reading `world` on every step.
    pub fn iter<'a, 'w, W: WorldAccess + ?Sized>(&'a mut self, world: &'w W) -> Steps<'a, 'c, 'w, W> {
        Steps {
            walker: self,
            world,
        }
    }
}

/// Iterator returned by [`ChainWalker::iter`].
#[derive(Debug)]
pub struct Steps<'a, 'c, 'w, W: ?Sized> {
    walker: &'a mut ChainWalker<'c>,
    world: &'w W,
}

impl<'c, W: WorldAccess + ?Sized> Iterator for Steps<'_, 'c, '_, W> {
    type Item = Result<Step<'c>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.walker.step(self.world)
    }
}
