use super::*;
use crate::launch::Launcher;

fn spawn_overlay(
    commands: &mut Commands,
    heading: &str,
    heading_color: Color,
    card_border: Color,
    detail: String,
) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.72)),
            ZIndex(300),
            OutcomeOverlayRoot,
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(40.0)),
                        row_gap: Val::Px(16.0),
                        border: UiRect::all(Val::Px(2.0)),
                        min_width: Val::Px(320.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.04, 0.04, 0.08)),
                    BorderColor::all(card_border),
                ))
                .with_children(|card| {
                    card.spawn((
                        Text::new(heading),
                        TextFont {
                            font_size: 46.0,
                            ..default()
                        },
                        TextColor(heading_color),
                    ));

                    spacer(card, 4.0);

                    card.spawn((
                        Text::new(detail),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(subtitle_color()),
                    ));

                    spacer(card, 8.0);

                    spawn_button(
                        card,
                        "PLAY AGAIN",
                        (play_bg(), play_border(), play_text()),
                        OverlayPlayAgainButton,
                    );
                    spawn_button(
                        card,
                        "NEW LEVEL",
                        (hard_bg(), hard_border(), hard_text()),
                        OverlayNewLevelButton,
                    );
                    spawn_button(
                        card,
                        "MENU",
                        (back_bg(), back_border(), back_text()),
                        OverlayMenuButton,
                    );

                    spacer(card, 4.0);

                    card.spawn((
                        Text::new("Press Enter to play again"),
                        TextFont {
                            font_size: 12.0,
                            ..default()
                        },
                        TextColor(hint_color()),
                    ));
                });
        });
}

fn tries_summary(launcher: Option<&Launcher>) -> String {
    match launcher.and_then(|l| l.attempts().counts()) {
        Some((remaining, max)) => format!("Tries used: {} of {}", max - remaining, max),
        None => "Unlimited tries".to_string(),
    }
}

/// Success overlay over the frozen world.
pub fn setup_won_overlay(
    mut commands: Commands,
    current: Res<CurrentLevel>,
    launcher: Option<Res<Launcher>>,
) {
    spawn_overlay(
        &mut commands,
        "ALIENS DOWN!",
        title_color(),
        play_border(),
        format!(
            "Level {} cleared  ·  {}",
            current.0.name(),
            tries_summary(launcher.as_deref())
        ),
    );
}

/// Failure overlay over the frozen world.
pub fn setup_lost_overlay(
    mut commands: Commands,
    current: Res<CurrentLevel>,
    launcher: Option<Res<Launcher>>,
) {
    spawn_overlay(
        &mut commands,
        "OUT OF STARS",
        Color::srgb(1.0, 0.22, 0.22),
        quit_border(),
        format!(
            "Level {}  ·  {}",
            current.0.name(),
            tries_summary(launcher.as_deref())
        ),
    );
}

pub fn cleanup_outcome_overlay(
    mut commands: Commands,
    query: Query<Entity, With<OutcomeOverlayRoot>>,
) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Handle Play Again / New Level / Menu on an outcome overlay.
///
/// Re-entering `Playing` tears down and rebuilds the level, so both replay
/// buttons only need to pick the level and switch state.
#[allow(clippy::type_complexity)]
pub fn overlay_button_system(
    play_query: Query<
        (&Interaction, &Children),
        (Changed<Interaction>, With<OverlayPlayAgainButton>),
    >,
    new_level_query: Query<
        (&Interaction, &Children),
        (Changed<Interaction>, With<OverlayNewLevelButton>),
    >,
    menu_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<OverlayMenuButton>)>,
    mut btn_text: Query<&mut TextColor>,
    keys: Res<ButtonInput<KeyCode>>,
    mut current: ResMut<CurrentLevel>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let wants_play_again = keys.just_pressed(KeyCode::Enter)
        || play_query.iter().any(|(i, _)| *i == Interaction::Pressed);
    if wants_play_again {
        let level = current.0;
        start_level(level, &mut current, &mut next_state);
        return;
    }

    if new_level_query
        .iter()
        .any(|(i, _)| *i == Interaction::Pressed)
    {
        let level = current.0.other();
        start_level(level, &mut current, &mut next_state);
        return;
    }

    if menu_query.iter().any(|(i, _)| *i == Interaction::Pressed) {
        next_state.set(GameState::MainMenu);
        return;
    }

    for (interaction, children) in play_query.iter() {
        tint_button_text(interaction, children, &mut btn_text, play_text());
    }
    for (interaction, children) in new_level_query.iter() {
        tint_button_text(interaction, children, &mut btn_text, hard_text());
    }
    for (interaction, children) in menu_query.iter() {
        tint_button_text(interaction, children, &mut btn_text, back_text());
    }
}
