//! Selector resolution.
//!
//! Turns a [`Selector`] into the entities it picks for one context. Nothing
//! is cached: every call reads the world as it is now.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::trace;
use voxecute_foundation::{ArgValue, EntityId, Error, InterpretError, Result, Vec3};
use voxecute_language::{Coord, PositionExpr, Selector, Sort};
use voxecute_storage::{EntityQuery, GameMode, PLAYER_TYPE, ScoreFilter, WorldAccess, qualify_type};

use crate::context::Context;

/// Arguments that confine the search to the context's dimension.
const SPATIAL_ARGUMENTS: &[&str] = &["dx", "dy", "dz", "r", "rm"];

// =============================================================================
// SelectorResolver
// =============================================================================

/// Resolves selectors against a world.
pub struct SelectorResolver;

impl SelectorResolver {
    /// Returns the entities `selector` picks from `ctx`, in result order.
    ///
    /// # Errors
    ///
    /// Returns an error if the context's bound entity is gone, if local and
    /// world coordinates are mixed in `x`/`y`/`z`, or if `m=` names no game
    /// mode.
    pub fn resolve<W: WorldAccess + ?Sized>(
        selector: &Selector,
        ctx: &Context,
        world: &W,
        rng: &mut ChaCha8Rng,
    ) -> Result<Vec<EntityId>> {
        let selector_type = selector.selector_type();

        // Step 1-2: host query and anchor
        let anchor = Self::anchor(selector, ctx, world)?;
        let query = Self::build_query(selector, anchor)?;

        // Step 3: dimensions
        let dimensions = if SPATIAL_ARGUMENTS.iter().any(|a| selector.has(a)) {
            vec![ctx.dimension.clone()]
        } else {
            world.dimensions()
        };

        // Step 4: candidates
        let mut ids = Vec::new();
        for dimension in &dimensions {
            if selector_type.alive_only {
                ids.extend(world.query_entities(dimension, &query));
            } else {
                let mut non_players = query.clone();
                non_players.exclude_types.push(PLAYER_TYPE.to_string());
                ids.extend(world.query_entities(dimension, &non_players));
                ids.extend(world.query_players(dimension, &query));
            }
        }

        // Step 5: type restriction
        if let Some(restriction) = selector_type.traits.type_restriction {
            if !restriction.overridable || !selector.has("type") {
                ids.retain(|id| {
                    world
                        .entity(*id)
                        .is_some_and(|r| r.entity_type == restriction.entity_type)
                });
            }
        }

        // Step 6: permissions
        if let Some(ArgValue::Map(entries)) = selector.first("haspermission") {
            ids.retain(|id| {
                let Some(player) = world.entity(*id).and_then(|r| r.player.as_ref()) else {
                    return false;
                };
                entries.iter().all(|entry| {
                    let enabled = entry.value.as_text() == Some("enabled");
                    (player.permission(&entry.key) == enabled) != entry.inverted
                })
            });
        }

        // Step 7: items. Accepted and validated; the host keeps no inventories.
        if selector.has("hasitem") {
            trace!(selector = %selector, "hasitem does not filter");
        }

        // Step 8: sort
        match selector_type.sort {
            Sort::Nearest => {
                let distance = |id: &EntityId| {
                    world
                        .entity(*id)
                        .map_or(f64::INFINITY, |r| r.location.distance(anchor))
                };
                ids.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
            }
            Sort::Random => ids.shuffle(rng),
        }

        // Step 9: post filter
        if let Some(filter) = selector_type.traits.post_filter {
            ids = filter(ids, ctx.executor);
        }

        // Step 10: count
        let limit = match selector.count() {
            Some(count) => {
                if count < 0 {
                    ids.reverse();
                }
                Some(usize::try_from(count.unsigned_abs()).unwrap_or(usize::MAX))
            }
            None => selector_type.traits.default_limit,
        };
        if let Some(limit) = limit {
            ids.truncate(limit);
        }

        trace!(selector = %selector, matched = ids.len(), "resolved selector");
        Ok(ids)
    }

    /// Resolves `x`/`y`/`z` against the context position.
    fn anchor<W: WorldAccess + ?Sized>(selector: &Selector, ctx: &Context, world: &W) -> Result<Vec3> {
        let coord = |name: &str| match selector.first(name) {
            Some(ArgValue::Relative(offset)) => Coord::relative(*offset),
            Some(value) => value.as_number().map_or(Coord::relative(0.0), Coord::absolute),
            None => Coord::relative(0.0),
        };
        let origin = ctx.resolve_position(world)?;
        PositionExpr::new(coord("x"), coord("y"), coord("z")).resolve(origin, ctx.rotation)
    }

    fn build_query(selector: &Selector, anchor: Vec3) -> Result<EntityQuery> {
        let mut query = EntityQuery::at(anchor);
        let number = |name: &str| selector.first(name).and_then(ArgValue::as_number);
        let int = |name: &str| selector.first(name).and_then(ArgValue::as_int);
        let excluded = |name: &str| -> Vec<String> {
            selector
                .inverted(name)
                .filter_map(ArgValue::as_text)
                .map(str::to_string)
                .collect()
        };
        let positive = |name: &str| {
            selector
                .positive(name)
                .and_then(ArgValue::as_text)
                .map(str::to_string)
        };

        query.entity_type = positive("type").map(|t| qualify_type(&t));
        query.exclude_types = excluded("type").iter().map(|t| qualify_type(t)).collect();
        query.name = positive("name");
        query.exclude_names = excluded("name");
        query.tags = positive("tag").into_iter().collect();
        query.exclude_tags = excluded("tag");
        query.families = positive("family").into_iter().collect();
        query.exclude_families = excluded("family");

        query.max_distance = number("r");
        query.min_distance = number("rm");
        if ["dx", "dy", "dz"].iter().any(|a| selector.has(a)) {
            query.volume = Some(Vec3::new(
                number("dx").unwrap_or(0.0),
                number("dy").unwrap_or(0.0),
                number("dz").unwrap_or(0.0),
            ));
        }
        query.max_pitch = number("rx");
        query.min_pitch = number("rxm");
        query.max_yaw = number("ry");
        query.min_yaw = number("rym");
        query.max_level = int("l");
        query.min_level = int("lm");

        query.game_mode = selector.positive("m").map(game_mode).transpose()?;
        query.exclude_game_modes = selector
            .inverted("m")
            .map(game_mode)
            .collect::<Result<_>>()?;

        if let Some(ArgValue::Map(entries)) = selector.first("scores") {
            query.scores = entries
                .iter()
                .filter_map(|entry| {
                    entry.value.as_range().map(|range| ScoreFilter {
                        objective: entry.key.clone(),
                        range,
                        exclude: entry.inverted,
                    })
                })
                .collect();
        }

        Ok(query)
    }
}

fn game_mode(value: &ArgValue) -> Result<GameMode> {
    GameMode::parse(&value.to_string()).ok_or_else(|| {
        Error::interpret(InterpretError::ShapeMismatch {
            argument: "m".to_string(),
            value: value.to_string(),
        })
    })
}
