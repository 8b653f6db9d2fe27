//! Eager, depth-first chain evaluation.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};
use voxecute_foundation::{ErrorContext, Result};
use voxecute_storage::{WorldAccess, WorldMut};

use crate::chain::Chain;
use crate::command::CommandRenderer;
use crate::config::ExecConfig;
use crate::context::{Context, Sender};
use crate::subcommand::Subcommand;
use crate::walker::ChainWalker;

/// Runs chains against a world.
///
/// The evaluator owns the random source for randomly sorted selectors and the
/// command renderer's marker counter, so both advance across runs.
#[derive(Clone, Debug)]
pub struct Evaluator {
    config: ExecConfig,
    rng: ChaCha8Rng,
    renderer: CommandRenderer,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(ExecConfig::default())
    }
}

impl Evaluator {
    /// Creates an evaluator seeded from `config`.
    #[must_use]
    pub fn new(config: ExecConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            renderer: CommandRenderer::new(&config),
            config,
        }
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &ExecConfig {
        &self.config
    }

    /// Builds the root context for `sender`.
    ///
    /// # Errors
    ///
    /// See [`Context::root`].
    pub fn root<W: WorldAccess + ?Sized>(&self, sender: Sender, world: &W) -> Result<Context> {
        Context::root(sender, world, &self.config)
    }

    /// Runs `action` once per final context, depth-first and left to right.
    ///
    /// Branches whose fork or guard yields nothing are dropped silently. The
    /// action may mutate the world; later branches see the change.
    ///
    /// Returns the number of times the action ran.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first error, from a subcommand or the action.
    pub fn run<W, F>(&mut self, chain: &Chain, world: &mut W, root: &Context, mut action: F) -> Result<usize>
    where
        W: WorldAccess + ?Sized,
        F: FnMut(&mut W, &Context) -> Result<()>,
    {
        debug!(subcommands = chain.len(), chain = %chain, "evaluating chain");
        let mut count = 0;
        descend(chain, 0, root.clone(), world, &mut self.rng, &mut action, &mut count)?;
        debug!(actions = count, "chain finished");
        Ok(count)
    }

    /// Renders and submits `command` once per final context.
    ///
    /// # Errors
    ///
    /// Returns the first subcommand or submission error.
    pub fn run_command<W: WorldMut + ?Sized>(
        &mut self,
        chain: &Chain,
        world: &mut W,
        root: &Context,
        command: &str,
    ) -> Result<usize> {
        debug!(subcommands = chain.len(), chain = %chain, command, "running command");
        let renderer = &mut self.renderer;
        let mut count = 0;
        descend(
            chain,
            0,
            root.clone(),
            world,
            &mut self.rng,
            &mut |world: &mut W, ctx: &Context| renderer.submit(world, ctx, command).map(|_| ()),
            &mut count,
        )?;
        debug!(actions = count, "chain finished");
        Ok(count)
    }

    /// The final contexts, in the order [`Evaluator::run`] would visit them.
    ///
    /// # Errors
    ///
    /// Returns the first subcommand error.
    pub fn collect<W: WorldAccess + ?Sized>(
        &mut self,
        chain: &Chain,
        world: &W,
        root: &Context,
    ) -> Result<Vec<Context>> {
        let mut walker = self.walker(chain, root);
        let mut out = Vec::new();
        for step in walker.iter(world) {
            let step = step?;
            if let (true, Some(context)) = (step.is_final, step.context) {
                out.push(context);
            }
        }
        Ok(out)
    }

    /// A lazy walker over `chain`, with a random source split off this
    /// evaluator's.
    pub fn walker<'c>(&mut self, chain: &'c Chain, root: &Context) -> ChainWalker<'c> {
        ChainWalker::new(chain, root.clone(), ChaCha8Rng::seed_from_u64(self.rng.next_u64()))
    }
}

fn descend<W, F>(
    chain: &Chain,
    index: usize,
    ctx: Context,
    world: &mut W,
    rng: &mut ChaCha8Rng,
    action: &mut F,
    count: &mut usize,
) -> Result<()>
where
    W: WorldAccess + ?Sized,
    F: FnMut(&mut W, &Context) -> Result<()>,
{
    let Some(sub) = chain.get(index) else {
        action(world, &ctx)?;
        *count += 1;
        return Ok(());
    };
    let children = apply_step(sub, index, &ctx, world, rng)?;
    if children.is_empty() {
        trace!(index, subcommand = %sub, "branch pruned");
    }
    for child in children {
        descend(chain, index + 1, child, world, rng, action, count)?;
    }
    Ok(())
}

/// Applies one subcommand, locating any error at its index.
pub(crate) fn apply_step<W: WorldAccess + ?Sized>(
    sub: &Subcommand,
    index: usize,
    ctx: &Context,
    world: &W,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<Context>> {
    sub.apply(ctx, world, rng).map_err(|err| {
        if err.context.is_some() {
            err
        } else {
            err.with_context(
                ErrorContext::new()
                    .with_source(sub.to_string())
                    .with_subcommand(index),
            )
        }
    })
}
