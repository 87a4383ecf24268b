use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{Alert, MessageList, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    let input_height = tui.input_box.calculate_height(frame.area().width);
    let layout = Layout::vertical([Length(1), Min(0), Length(input_height)]);
    let [title_area, main_area, input_area] = layout.areas(frame.area());

    MessageList::new(&mut tui.message_list, &app.transcript, app.is_loading())
        .render(frame, main_area);

    // Title bar reads scroll state after the list updated it this frame
    TitleBar::new(
        app.dispatcher.active(),
        app.status_message.clone(),
        tui.message_list.has_unseen_content(),
    )
    .render(frame, title_area);

    tui.input_box.render(frame, input_area);

    if let Some(alert) = &app.alert {
        Alert::new(alert).render(frame, frame.area());
    }
}
