//! Rendering terminal contexts as host commands.
//!
//! A context with an explicit position renders to
//! `execute in <dim> rotated <yaw> <pitch> positioned <x> <y> <z> run <cmd>`.
//! A bound position cannot be written as coordinates without losing the link
//! to the entity, so the entity is tagged with a transient marker for the
//! duration of the submission and the command positions itself on the marker.
//! Players are found through `@a`, which also matches dead players.

use tracing::{debug, warn};
use voxecute_foundation::Result;
use voxecute_storage::{CommandSource, EntityRecord, WorldAccess, WorldMut};

use crate::config::ExecConfig;
use crate::context::{Anchor, Context, Position};

/// Renders and submits terminal commands.
#[derive(Clone, Debug)]
pub struct CommandRenderer {
    command_prefix: String,
    marker_prefix: String,
    next_marker: u64,
}

impl CommandRenderer {
    /// Creates a renderer using the config's prefixes.
    #[must_use]
    pub fn new(config: &ExecConfig) -> Self {
        Self {
            command_prefix: config.command_prefix.clone(),
            marker_prefix: config.marker_prefix.clone(),
            next_marker: 0,
        }
    }

    /// Renders `command` for `ctx` with the position read now.
    ///
    /// # Errors
    ///
    /// Returns an error if the context's bound entity no longer exists.
    pub fn render<W: WorldAccess + ?Sized>(
        &self,
        ctx: &Context,
        world: &W,
        command: &str,
    ) -> Result<String> {
        let position = ctx.resolve_position(world)?;
        Ok(format!("{} positioned {position} run {command}", self.header(ctx)))
    }

    fn header(&self, ctx: &Context) -> String {
        format!(
            "{} in {} rotated {} {}",
            self.command_prefix,
            ctx.dimension,
            ctx.rotation.yaw(),
            ctx.rotation.pitch()
        )
    }

    fn render_marked(&self, ctx: &Context, marker: &str, player: bool, command: &str) -> String {
        let selector = if player { "@a" } else { "@e" };
        let eyes = if ctx.anchor == Anchor::Eyes {
            " anchored eyes positioned ^ ^ ^"
        } else {
            ""
        };
        format!(
            "{} positioned as {selector}[tag={marker},c=1]{eyes} run {command}",
            self.header(ctx)
        )
    }

    fn fresh_marker(&mut self) -> String {
        let marker = format!("{}{}", self.marker_prefix, self.next_marker);
        self.next_marker += 1;
        marker
    }

    /// Submits `command` for `ctx`.
    ///
    /// The source is the context's executor, or its dimension when it has
    /// none. A marker tag added for a bound position is removed again whether
    /// or not the submission succeeded.
    ///
    /// # Errors
    ///
    /// Returns the submission error, or the marker removal error if the
    /// submission itself succeeded.
    pub fn submit<W: WorldMut + ?Sized>(
        &mut self,
        world: &mut W,
        ctx: &Context,
        command: &str,
    ) -> Result<u32> {
        let source = match ctx.executor {
            Some(id) => CommandSource::Entity(id),
            None => CommandSource::Dimension(ctx.dimension.clone()),
        };

        let Position::Bound(bound) = ctx.position else {
            let text = self.render(ctx, world, command)?;
            debug!(command = %text, "submitting command");
            return world.submit_command(&source, &text);
        };

        let player = world.entity(bound).is_some_and(EntityRecord::is_player);
        let marker = self.fresh_marker();
        let text = self.render_marked(ctx, &marker, player, command);
        world.add_tag(bound, &marker)?;
        debug!(entity = %bound, marker = %marker, "added marker tag");

        debug!(command = %text, "submitting command");
        let submitted = world.submit_command(&source, &text);

        let removed = world.remove_tag(bound, &marker);
        match &removed {
            Ok(()) => debug!(entity = %bound, marker = %marker, "removed marker tag"),
            Err(error) => warn!(entity = %bound, marker = %marker, %error, "failed to remove marker tag"),
        }
        let count = submitted?;
        removed?;
        Ok(count)
    }
}
