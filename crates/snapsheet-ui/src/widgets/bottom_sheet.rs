//! Bottom sheet widget: the controller plus the pieces a host draws.

use snapsheet_core::RuntimeHandle;

use crate::config::SheetConfig;
use crate::error::SheetError;
use crate::sheet_controller::{SheetController, SheetState};

/// Everything a host needs to draw one frame of the sheet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SheetFrame {
    /// Offset of the sheet's top edge from the top of the screen.
    pub offset: f32,
    pub backdrop_opacity: f32,
    /// Visible fraction of the screen, in `[0, 1]`.
    pub fraction: f32,
}

/// A [`SheetController`] bundled with the content it presents.
///
/// The content is opaque and passed through untouched. When a title is set
/// the header shows it next to a close button; pressing that button
/// dismisses the sheet like any other trigger.
pub struct BottomSheet<C> {
    controller: SheetController,
    content: C,
    title: Option<String>,
}

impl<C> BottomSheet<C> {
    pub fn new(
        config: SheetConfig,
        screen_height: f32,
        runtime: RuntimeHandle,
        content: C,
        on_close: impl Fn() + 'static,
    ) -> Result<Self, SheetError> {
        let controller = SheetController::new(config, screen_height, runtime, on_close)?;
        Ok(Self {
            controller,
            content,
            title: None,
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The header, and with it the close button, only exists with a title.
    pub fn has_close_button(&self) -> bool {
        self.title.is_some()
    }

    pub fn close_button_pressed(&self) {
        if !self.has_close_button() {
            log::debug!("close button pressed on a sheet without a header");
            return;
        }
        self.controller.dismiss();
    }

    pub fn backdrop_pressed(&self) {
        self.controller.backdrop_tapped();
    }

    pub fn controller(&self) -> &SheetController {
        &self.controller
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    pub fn into_content(self) -> C {
        self.content
    }

    /// `None` while closed: nothing, backdrop included, is on screen.
    pub fn frame(&self) -> Option<SheetFrame> {
        if self.controller.state() == SheetState::Closed {
            return None;
        }
        let frame = SheetFrame {
            offset: self.controller.current_offset(),
            backdrop_opacity: self.controller.backdrop_opacity(),
            fraction: self.controller.current_fraction(),
        };
        log::trace!("sheet frame {:?}", frame);
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapsheet_core::{DefaultScheduler, Runtime, FRAME_NANOS_60HZ};
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::Arc;

    fn pump(runtime: &Runtime) {
        let handle = runtime.handle();
        let mut frame_time = handle.last_frame_time_nanos().unwrap_or(0);
        for _ in 0..1200 {
            if !handle.has_frame_callbacks() {
                break;
            }
            frame_time += FRAME_NANOS_60HZ;
            handle.drain_frame_callbacks(frame_time);
        }
    }

    #[test]
    fn closed_sheet_has_no_frame() {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let sheet = BottomSheet::new(SheetConfig::default(), 800.0, runtime.handle(), "content", || {})
            .expect("valid config");
        assert_eq!(sheet.frame(), None);
        assert_eq!(*sheet.content(), "content");

        sheet.controller().set_visible(true);
        pump(&runtime);
        let frame = sheet.frame().expect("open sheet has a frame");
        assert!((frame.offset - 400.0).abs() < 1e-3);
        assert_eq!(frame.backdrop_opacity, 0.5);
        assert!((frame.fraction - 0.5).abs() < 1e-4);
    }

    #[test]
    fn close_button_dismisses_titled_sheet() {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let closes = Rc::new(Cell::new(0));
        let counter = closes.clone();
        let sheet = BottomSheet::new(
            SheetConfig::default().with_visible(true),
            800.0,
            runtime.handle(),
            vec![1, 2, 3],
            move || counter.set(counter.get() + 1),
        )
        .expect("valid config")
        .with_title("Order details");

        assert_eq!(sheet.title(), Some("Order details"));
        assert!(sheet.has_close_button());
        pump(&runtime);

        sheet.close_button_pressed();
        sheet.close_button_pressed();
        pump(&runtime);

        assert_eq!(closes.get(), 1);
        assert_eq!(sheet.frame(), None);
        assert_eq!(sheet.into_content(), vec![1, 2, 3]);
    }

    #[test]
    fn untitled_sheet_has_no_close_button() {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let sheet = BottomSheet::new(
            SheetConfig::default().with_visible(true),
            800.0,
            runtime.handle(),
            (),
            || {},
        )
        .expect("valid config");
        pump(&runtime);

        sheet.close_button_pressed();
        assert_eq!(sheet.controller().state(), SheetState::Resting(1));
    }
}
