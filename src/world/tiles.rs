//! Interactive tiles: world objects that break when a qualifying item is
//! used on them, optionally carrying the break into a linked counterpart in
//! the other timeline.
use bevy::prelude::*;

use super::items::{Item, ItemKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileState {
    Intact,
    Broken,
}

#[derive(Component, Debug, Clone)]
pub struct InteractiveTile {
    state: TileState,
    /// Past copies forward direct use to their counterpart and ignore
    /// indirect use themselves.
    pub is_past: bool,
    pub counterpart: Option<Entity>,
    /// Generic items are matched by prefab name.
    pub usable_prefab_names: Vec<String>,
    /// Specialised items are matched by kind.
    pub usable_kinds: Vec<ItemKind>,
}

/// Result of a direct use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileUseOutcome {
    /// Item handed back to the user; `None` leaves the hand empty.
    pub replacement: Option<Item>,
    /// The linked counterpart changed to broken as part of this use.
    pub counterpart_broken: bool,
}

impl InteractiveTile {
    pub fn new(is_past: bool) -> Self {
        Self {
            state: TileState::Intact,
            is_past,
            counterpart: None,
            usable_prefab_names: Vec::new(),
            usable_kinds: Vec::new(),
        }
    }

    pub fn with_prefab_names(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.usable_prefab_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_kinds(mut self, kinds: impl IntoIterator<Item = ItemKind>) -> Self {
        self.usable_kinds = kinds.into_iter().collect();
        self
    }

    pub fn state(&self) -> TileState {
        self.state
    }

    pub fn is_broken(&self) -> bool {
        self.state == TileState::Broken
    }

    /// Empty hands may always interact; otherwise the item must be on the
    /// allow-list matching its kind.
    pub fn can_use_item(&self, item: Option<&Item>) -> bool {
        let Some(item) = item else {
            return true;
        };
        match item.kind {
            ItemKind::Generic => self.usable_prefab_names.iter().any(|n| *n == item.name),
            kind => self.usable_kinds.contains(&kind),
        }
    }

    /// Breaks this tile. A past copy forwards the use to its counterpart
    /// through the indirect path and returns the counterpart's replacement.
    pub fn use_item(
        &mut self,
        item: Option<&Item>,
        counterpart: Option<&mut InteractiveTile>,
    ) -> TileUseOutcome {
        self.state = TileState::Broken;

        let mut outcome = TileUseOutcome::default();
        if !self.is_past {
            return outcome;
        }
        if let Some(other) = counterpart {
            let was_broken = other.is_broken();
            outcome.replacement = other.indirect_use_item(item);
            outcome.counterpart_broken = !was_broken && other.is_broken();
        }
        outcome
    }

    /// Weapons come back unconsumed. Past copies are sinks here and stay
    /// intact.
    pub fn indirect_use_item(&mut self, item: Option<&Item>) -> Option<Item> {
        let replacement = item.filter(|item| item.kind == ItemKind::Weapon).cloned();
        if !self.is_past {
            self.state = TileState::Broken;
        }
        replacement
    }
}

/// Sprites for the intact and broken states.
#[derive(Component, Debug, Clone)]
pub struct TileSprites {
    pub intact: Handle<Image>,
    pub broken: Handle<Image>,
}

/// Solid box blocking character movement while enabled.
#[derive(Component, Debug, Clone)]
pub struct Blocker {
    pub half_extents: Vec2,
    pub enabled: bool,
}

impl Blocker {
    pub fn new(half_extents: Vec2) -> Self {
        Self {
            half_extents: half_extents.abs(),
            enabled: true,
        }
    }

    /// Whether a character box of `character_half` at `point` overlaps this
    /// blocker centred at `center`.
    pub fn overlaps(&self, center: Vec2, point: Vec2, character_half: Vec2) -> bool {
        if !self.enabled {
            return false;
        }
        let reach = self.half_extents + character_half;
        let offset = (point - center).abs();
        offset.x < reach.x && offset.y < reach.y
    }
}

/// Inbound: `user` applies `item` (or bare hands) to `tile`.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct TileUseRequest {
    pub tile: Entity,
    pub user: Entity,
    pub item: Option<Item>,
}

/// Outbound: a tile was broken by direct use.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileDisabled {
    pub tile: Entity,
}

/// Outbound: result of a completed use for the user's hand.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct TileItemUsed {
    pub user: Entity,
    pub tile: Entity,
    pub replacement: Option<Item>,
}

pub fn apply_tile_use(
    mut requests: MessageReader<TileUseRequest>,
    mut tiles: Query<&mut InteractiveTile>,
    mut visuals: Query<(Option<&TileSprites>, Option<&mut Sprite>, Option<&mut Blocker>)>,
    mut disabled: MessageWriter<TileDisabled>,
    mut used: MessageWriter<TileItemUsed>,
) {
    for request in requests.read() {
        let Ok(tile) = tiles.get(request.tile) else {
            continue;
        };
        if !tile.can_use_item(request.item.as_ref()) {
            debug!(
                target: "tiles",
                "Tile {:?} rejects {:?}",
                request.tile,
                request.item.as_ref().map(|item| item.name.as_str())
            );
            continue;
        }

        let item = request.item.as_ref();
        let counterpart = tile.counterpart.filter(|other| *other != request.tile);
        let linked = match counterpart {
            Some(other) => match tiles.get_many_mut([request.tile, other]) {
                Ok([mut tile, mut other]) => Some(tile.use_item(item, Some(&mut *other))),
                Err(_) => None,
            },
            None => None,
        };
        let outcome = match linked {
            Some(outcome) => outcome,
            None => match tiles.get_mut(request.tile) {
                Ok(mut tile) => tile.use_item(item, None),
                Err(_) => continue,
            },
        };

        show_broken(request.tile, &mut visuals);
        disabled.write(TileDisabled { tile: request.tile });
        if outcome.counterpart_broken {
            if let Some(other) = counterpart {
                show_broken(other, &mut visuals);
                disabled.write(TileDisabled { tile: other });
            }
        }

        info!(
            target: "tiles",
            "Tile {:?} broken by {:?}",
            request.tile,
            item.map(|item| item.name.as_str()).unwrap_or("bare hands")
        );
        used.write(TileItemUsed {
            user: request.user,
            tile: request.tile,
            replacement: outcome.replacement,
        });
    }
}

#[allow(clippy::type_complexity)]
fn show_broken(
    entity: Entity,
    visuals: &mut Query<(Option<&TileSprites>, Option<&mut Sprite>, Option<&mut Blocker>)>,
) {
    let Ok((sprites, sprite, blocker)) = visuals.get_mut(entity) else {
        return;
    };
    if let (Some(sprites), Some(mut sprite)) = (sprites, sprite) {
        sprite.image = sprites.broken.clone();
    }
    if let Some(mut blocker) = blocker {
        blocker.enabled = false;
    }
}
