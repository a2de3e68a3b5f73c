use super::*;

pub(super) fn play_bg() -> Color {
    Color::srgb(0.08, 0.36, 0.14)
}
pub(super) fn play_border() -> Color {
    Color::srgb(0.18, 0.72, 0.28)
}
pub(super) fn play_text() -> Color {
    Color::srgb(0.75, 1.0, 0.80)
}
pub(super) fn hard_bg() -> Color {
    Color::srgb(0.36, 0.20, 0.04)
}
pub(super) fn hard_border() -> Color {
    Color::srgb(0.80, 0.48, 0.12)
}
pub(super) fn hard_text() -> Color {
    Color::srgb(1.0, 0.85, 0.55)
}
pub(super) fn quit_bg() -> Color {
    Color::srgb(0.28, 0.06, 0.06)
}
pub(super) fn quit_border() -> Color {
    Color::srgb(0.60, 0.12, 0.12)
}
pub(super) fn quit_text() -> Color {
    Color::srgb(1.0, 0.65, 0.65)
}
pub(super) fn back_bg() -> Color {
    Color::srgb(0.12, 0.12, 0.18)
}
pub(super) fn back_border() -> Color {
    Color::srgb(0.30, 0.30, 0.46)
}
pub(super) fn back_text() -> Color {
    Color::srgb(0.65, 0.65, 0.80)
}
pub(super) fn title_color() -> Color {
    Color::srgb(0.95, 0.88, 0.45)
}
pub(super) fn subtitle_color() -> Color {
    Color::srgb(0.55, 0.55, 0.65)
}
pub(super) fn hint_color() -> Color {
    Color::srgb(0.28, 0.28, 0.35)
}

pub(super) fn spacer(parent: &mut ChildSpawnerCommands<'_>, px: f32) {
    parent.spawn(Node {
        height: Val::Px(px),
        ..default()
    });
}

/// Spawn a 220×50 text button tagged with `marker`.
pub(super) fn spawn_button(
    parent: &mut ChildSpawnerCommands<'_>,
    label: &str,
    (bg, border, text): (Color, Color, Color),
    marker: impl Bundle,
) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(220.0),
                height: Val::Px(50.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(bg),
            BorderColor::all(border),
            marker,
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(label),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(text),
            ));
        });
}

/// White text on hover, `idle` otherwise.
pub(super) fn tint_button_text(
    interaction: &Interaction,
    children: &Children,
    btn_text: &mut Query<&mut TextColor>,
    idle: Color,
) {
    let color = match interaction {
        Interaction::Hovered => Color::WHITE,
        Interaction::None => idle,
        Interaction::Pressed => return,
    };
    for child in children.iter() {
        if let Ok(mut text) = btn_text.get_mut(child) {
            *text = TextColor(color);
        }
    }
}
