// src/ui/tooltip.rs
//
// Item-name tooltip shown next to the pointer while hovering an item.

use bevy::{prelude::*, ui::FocusPolicy, window::PrimaryWindow};

use super::{
    components::{is_hit_testable, TooltipText, UiItem},
    widgets::UiWidgets,
};

const CURSOR_OFFSET: Vec2 = Vec2::new(14.0, 14.0);

/// Name of the first hovered item that accepts pointer input.
pub fn hovered_item_name<'a>(
    items: impl IntoIterator<Item = (&'a Interaction, &'a UiItem, &'a FocusPolicy)>,
) -> Option<&'a str> {
    items
        .into_iter()
        .find(|(interaction, _, focus)| {
            **interaction == Interaction::Hovered && is_hit_testable(focus)
        })
        .map(|(_, item, _)| item.0.name.as_str())
}

pub fn update_tooltip(
    widgets: Option<Res<UiWidgets>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    items: Query<(&Interaction, &UiItem, &FocusPolicy)>,
    mut tooltips: Query<(&mut Node, &mut Visibility)>,
    mut texts: Query<&mut Text, With<TooltipText>>,
) {
    let Some(widgets) = widgets else {
        return;
    };
    let Ok((mut node, mut visibility)) = tooltips.get_mut(widgets.tooltip) else {
        return;
    };

    let Some(name) = hovered_item_name(&items) else {
        if *visibility != Visibility::Hidden {
            *visibility = Visibility::Hidden;
        }
        return;
    };

    if let Ok(mut text) = texts.single_mut() {
        if text.0 != name {
            text.0 = name.to_string();
        }
    }
    if let Some(cursor) = windows.single().ok().and_then(Window::cursor_position) {
        let at = cursor + CURSOR_OFFSET;
        node.left = Val::Px(at.x);
        node.top = Val::Px(at.y);
    }
    if *visibility != Visibility::Inherited {
        *visibility = Visibility::Inherited;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::items::Item;

    #[test]
    fn only_hit_testable_hovered_items_show_a_name() {
        let sword = UiItem(Item::weapon("sword"));
        let flask = UiItem(Item::generic("flask"));
        let hovered = Interaction::Hovered;
        let idle = Interaction::None;

        let items = [
            (&hovered, &sword, &FocusPolicy::Pass),
            (&idle, &flask, &FocusPolicy::Block),
        ];
        assert_eq!(hovered_item_name(items), None);

        let items = [
            (&idle, &sword, &FocusPolicy::Block),
            (&hovered, &flask, &FocusPolicy::Block),
        ];
        assert_eq!(hovered_item_name(items), Some("flask"));
    }
}
