// SPDX-License-Identifier: MIT OR Apache-2.0

use egui::{Event, Modifiers, PointerButton, Pos2, RawInput, Rect, Vec2};
use gridmark_core::{Board, BoardProps, ClickOutcome, DispatchOutcome, RenderOutcome, RenderStyle, ThemeMode, TurnState};
use gridmark_ui_egui::components::BoardWidget;
use serde_json::json;

fn input(events: Vec<Event>) -> RawInput {
    RawInput {
        screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0))),
        events,
        ..Default::default()
    }
}

/// Run one frame with the widget in a central panel
fn frame(
    ctx: &egui::Context,
    widget: &mut BoardWidget,
    board: &Board,
    transport: &mut gridmark_network::ChannelTransport,
    turn: &mut TurnState,
    events: Vec<Event>,
) -> (Rect, RenderOutcome, Option<ClickOutcome>) {
    let mut result = None;
    let _ = ctx.run(input(events), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            let props = BoardProps {
                board,
                game_over: false,
                win_line: None,
                theme: ThemeMode::Light,
            };
            let response = widget.show(ui, &props, transport, &mut |state: TurnState| *turn = state);
            result = Some((response.response.rect, response.render, response.click));
        });
    });
    result.expect("panel ran")
}

#[test]
fn click_in_top_right_cell_sends_move() {
    let ctx = egui::Context::default();
    let mut widget = BoardWidget::new(RenderStyle::default(), 300.0);
    let board = Board::new(3);
    let (mut transport, outbound) = gridmark_network::channel();
    let mut turn = TurnState::default();

    let (rect, render, _) = frame(&ctx, &mut widget, &board, &mut transport, &mut turn, vec![]);
    assert_eq!(render, RenderOutcome::Drawn);
    assert_eq!(rect.width(), 300.0);
    assert!(widget.view().geometry().is_some());

    let target = rect.min + Vec2::new(250.0, 50.0);
    let press = vec![
        Event::PointerMoved(target),
        Event::PointerButton {
            pos: target,
            button: PointerButton::Primary,
            pressed: true,
            modifiers: Modifiers::NONE,
        },
    ];
    let release = vec![Event::PointerButton {
        pos: target,
        button: PointerButton::Primary,
        pressed: false,
        modifiers: Modifiers::NONE,
    }];

    let (_, _, first) = frame(&ctx, &mut widget, &board, &mut transport, &mut turn, press);
    let (_, _, second) = frame(&ctx, &mut widget, &board, &mut transport, &mut turn, release);

    let clicks: Vec<_> = first.into_iter().chain(second).collect();
    assert_eq!(
        clicks,
        vec![ClickOutcome::Dispatched(DispatchOutcome::Sent { index: 2 })]
    );

    let envelope = outbound.try_recv().unwrap();
    assert_eq!(envelope.event, "turn");
    assert_eq!(envelope.payload, json!(2));
    assert_eq!(turn, TurnState::waiting());
}
