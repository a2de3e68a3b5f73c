use super::*;

/// Spawn the full-screen level picker.
///
/// Layout:
/// ```text
/// ┌─────────────────────────────────────────────┐
/// │           Cowboys vs Aliens                 │
/// │   Knock every alien off its saucer          │
/// │                                             │
/// │              [ EASY ]                       │
/// │              [ HARD ]                       │
/// │              [ QUIT ]                       │
/// │                                             │
/// │   Drag the star back, let go to launch      │
/// └─────────────────────────────────────────────┘
/// ```
pub fn setup_main_menu(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::BLACK),
            MainMenuRoot,
        ))
        .with_children(|root| {
            root.spawn((
                Text::new("Cowboys vs Aliens"),
                TextFont {
                    font_size: 56.0,
                    ..default()
                },
                TextColor(title_color()),
            ));

            spacer(root, 10.0);

            root.spawn((
                Text::new("Knock every alien off its saucer"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(subtitle_color()),
            ));

            spacer(root, 52.0);
            spawn_button(
                root,
                "EASY",
                (play_bg(), play_border(), play_text()),
                MenuEasyButton,
            );
            spacer(root, 14.0);
            spawn_button(
                root,
                "HARD",
                (hard_bg(), hard_border(), hard_text()),
                MenuHardButton,
            );
            spacer(root, 14.0);
            spawn_button(
                root,
                "QUIT",
                (quit_bg(), quit_border(), quit_text()),
                MenuQuitButton,
            );

            spacer(root, 40.0);

            root.spawn((
                Text::new("Drag the star back and let go to launch  ·  Esc returns here"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(hint_color()),
            ));
        });
}

pub fn cleanup_main_menu(mut commands: Commands, query: Query<Entity, With<MainMenuRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Handle Easy / Hard / Quit clicks and hover tinting.
#[allow(clippy::type_complexity)]
pub fn menu_button_system(
    easy_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<MenuEasyButton>)>,
    hard_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<MenuHardButton>)>,
    quit_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<MenuQuitButton>)>,
    mut btn_text: Query<&mut TextColor>,
    mut current: ResMut<CurrentLevel>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<AppExit>,
) {
    for (interaction, children) in easy_query.iter() {
        if *interaction == Interaction::Pressed {
            start_level(LevelId::Easy, &mut current, &mut next_state);
        }
        tint_button_text(interaction, children, &mut btn_text, play_text());
    }

    for (interaction, children) in hard_query.iter() {
        if *interaction == Interaction::Pressed {
            start_level(LevelId::Hard, &mut current, &mut next_state);
        }
        tint_button_text(interaction, children, &mut btn_text, hard_text());
    }

    for (interaction, children) in quit_query.iter() {
        if *interaction == Interaction::Pressed {
            exit.write(AppExit::Success);
        }
        tint_button_text(interaction, children, &mut btn_text, quit_text());
    }
}
