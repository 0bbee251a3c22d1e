use super::style;
use crate::egui_app::state::{Notices, Page, PendingCall};
use eframe::egui::{self, CornerRadius, Frame, Margin, RichText, Stroke};

/// Draw each notice as a tinted message box.
pub(super) fn render_notices(ui: &mut egui::Ui, notices: &Notices) {
    for notice in notices.iter() {
        let (fill, accent) = style::notice_colors(notice.tone);
        ui.add_space(6.0);
        Frame::new()
            .fill(fill)
            .stroke(Stroke::new(1.0, accent))
            .corner_radius(CornerRadius::same(3))
            .inner_margin(Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(&notice.text).color(accent));
            });
    }
}

/// Spinner with the pending call's label, drawn only on the page that issued it.
pub(super) fn render_busy(ui: &mut egui::Ui, pending: Option<PendingCall>, page: Page) {
    let Some(call) = pending.filter(|call| call.page() == page) else {
        return;
    };
    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.add(egui::Spinner::new());
        ui.label(RichText::new(call.busy_label()).color(style::palette().text_muted));
    });
}
