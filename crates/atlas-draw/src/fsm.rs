use atlas_types::{Point, RectBounds};

/// Current drawing state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawState {
    /// No interaction in progress.
    Idle,
    /// First corner placed; tracking the pointer for the preview rectangle.
    Anchored { anchor: Point, current: Point },
}

/// What a transition asks the surrounding component to do.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawEffect {
    /// Nothing to do.
    None,
    /// Render an ephemeral preview rectangle; nothing is persisted.
    Preview(RectBounds),
    /// A completed interaction: persist this rectangle under `code`.
    Commit { code: String, bounds: RectBounds },
    /// The interaction was aborted because no code label was set; surface a
    /// missing-code notice.
    MissingLabel,
    /// An in-progress interaction was discarded.
    Cancelled,
}

/// The two-point drawing state machine.
///
/// Long-lived: it never terminates, only returns to [`DrawState::Idle`].
/// All coordinates are percentage-normalized by the caller, so committed
/// rectangles stay meaningful across viewports of different pixel sizes.
/// Single-threaded local state; no synchronization concerns.
#[derive(Clone, Debug, Default)]
pub struct DrawingFsm {
    state: Option<(Point, Point)>,
    pending_label: String,
}

impl DrawingFsm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DrawState {
        match self.state {
            None => DrawState::Idle,
            Some((anchor, current)) => DrawState::Anchored { anchor, current },
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state.is_none()
    }

    /// The label the next committed region will carry.
    pub fn label(&self) -> &str {
        &self.pending_label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.pending_label = label.into();
    }

    fn label_is_empty(&self) -> bool {
        self.pending_label.trim().is_empty()
    }

    /// Handle a pointer click at a normalized coordinate.
    pub fn press(&mut self, point: Point) -> DrawEffect {
        match self.state {
            None => {
                if self.label_is_empty() {
                    return DrawEffect::MissingLabel;
                }
                self.state = Some((point, point));
                DrawEffect::Preview(RectBounds::from_corners(point, point))
            }
            Some((anchor, _)) => {
                self.state = None;
                if self.label_is_empty() {
                    // Abort silently: the label was cleared between clicks.
                    return DrawEffect::MissingLabel;
                }
                let code = std::mem::take(&mut self.pending_label).trim().to_string();
                DrawEffect::Commit {
                    code,
                    bounds: RectBounds::from_corners(anchor, point),
                }
            }
        }
    }

    /// Handle pointer movement. Only meaningful while anchored.
    pub fn hover(&mut self, point: Point) -> DrawEffect {
        match self.state {
            None => DrawEffect::None,
            Some((anchor, _)) => {
                self.state = Some((anchor, point));
                DrawEffect::Preview(RectBounds::from_corners(anchor, point))
            }
        }
    }

    /// Explicitly discard any in-progress interaction. The pending label is
    /// kept: cancelling a mis-click should not force retyping the code.
    pub fn cancel(&mut self) -> DrawEffect {
        match self.state.take() {
            None => DrawEffect::None,
            Some(_) => DrawEffect::Cancelled,
        }
    }

    /// Full reset, label included. Called when the underlying asset
    /// identity or generation changes: an anchor placed on the old asset
    /// must not produce a rectangle on the new one.
    pub fn reset(&mut self) {
        self.state = None;
        self.pending_label.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    // -----------------------------------------------------------------------
    // Happy path
    // -----------------------------------------------------------------------

    #[test]
    fn two_clicks_commit_a_normalized_rectangle() {
        let mut fsm = DrawingFsm::new();
        fsm.set_label("A1");

        assert!(matches!(fsm.press(p(80.0, 70.0)), DrawEffect::Preview(_)));
        assert!(!fsm.is_idle());

        let effect = fsm.press(p(10.0, 5.0));
        let DrawEffect::Commit { code, bounds } = effect else {
            panic!("expected commit, got {effect:?}");
        };
        assert_eq!(code, "A1");
        assert_eq!((bounds.x1, bounds.y1, bounds.x2, bounds.y2), (10.0, 5.0, 80.0, 70.0));

        // Back to Idle with everything cleared.
        assert!(fsm.is_idle());
        assert_eq!(fsm.label(), "");
    }

    #[test]
    fn commit_trims_the_label() {
        let mut fsm = DrawingFsm::new();
        fsm.set_label("  A1  ");
        fsm.press(p(0.0, 0.0));
        let DrawEffect::Commit { code, .. } = fsm.press(p(1.0, 1.0)) else {
            panic!("expected commit");
        };
        assert_eq!(code, "A1");
    }

    // -----------------------------------------------------------------------
    // Label guard
    // -----------------------------------------------------------------------

    #[test]
    fn first_click_without_label_stays_idle() {
        let mut fsm = DrawingFsm::new();
        assert_eq!(fsm.press(p(5.0, 5.0)), DrawEffect::MissingLabel);
        assert!(fsm.is_idle());
    }

    #[test]
    fn label_cleared_between_clicks_aborts() {
        let mut fsm = DrawingFsm::new();
        fsm.set_label("A1");
        fsm.press(p(5.0, 5.0));
        fsm.set_label("");

        assert_eq!(fsm.press(p(9.0, 9.0)), DrawEffect::MissingLabel);
        assert!(fsm.is_idle());
    }

    #[test]
    fn whitespace_label_counts_as_empty() {
        let mut fsm = DrawingFsm::new();
        fsm.set_label("   ");
        assert_eq!(fsm.press(p(5.0, 5.0)), DrawEffect::MissingLabel);
    }

    // -----------------------------------------------------------------------
    // Preview
    // -----------------------------------------------------------------------

    #[test]
    fn hover_updates_the_preview_rectangle() {
        let mut fsm = DrawingFsm::new();
        fsm.set_label("A1");
        fsm.press(p(10.0, 10.0));

        let DrawEffect::Preview(bounds) = fsm.hover(p(30.0, 5.0)) else {
            panic!("expected preview");
        };
        assert_eq!((bounds.x1, bounds.y1, bounds.x2, bounds.y2), (10.0, 5.0, 30.0, 10.0));

        // The second click uses the click coordinate, not the hover.
        let DrawEffect::Commit { bounds, .. } = fsm.press(p(20.0, 20.0)) else {
            panic!("expected commit");
        };
        assert_eq!((bounds.x2, bounds.y2), (20.0, 20.0));
    }

    #[test]
    fn hover_while_idle_is_ignored() {
        let mut fsm = DrawingFsm::new();
        assert_eq!(fsm.hover(p(1.0, 1.0)), DrawEffect::None);
        assert!(fsm.is_idle());
    }

    // -----------------------------------------------------------------------
    // Cancel / reset
    // -----------------------------------------------------------------------

    #[test]
    fn cancel_discards_the_anchor_but_keeps_the_label() {
        let mut fsm = DrawingFsm::new();
        fsm.set_label("A1");
        fsm.press(p(5.0, 5.0));

        assert_eq!(fsm.cancel(), DrawEffect::Cancelled);
        assert!(fsm.is_idle());
        assert_eq!(fsm.label(), "A1");

        // Cancelling while idle does nothing.
        assert_eq!(fsm.cancel(), DrawEffect::None);
    }

    #[test]
    fn reset_clears_everything() {
        let mut fsm = DrawingFsm::new();
        fsm.set_label("A1");
        fsm.press(p(5.0, 5.0));

        fsm.reset();
        assert!(fsm.is_idle());
        assert_eq!(fsm.label(), "");
    }

    #[test]
    fn state_reports_anchor_and_current() {
        let mut fsm = DrawingFsm::new();
        fsm.set_label("A1");
        assert_eq!(fsm.state(), DrawState::Idle);

        fsm.press(p(2.0, 3.0));
        fsm.hover(p(4.0, 5.0));
        assert_eq!(
            fsm.state(),
            DrawState::Anchored {
                anchor: p(2.0, 3.0),
                current: p(4.0, 5.0),
            }
        );
    }
}
