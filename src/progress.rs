use std::cell::RefCell;
use std::rc::Rc;

use crate::observer::ObserverId;
use crate::session::PresentationSession;
use crate::slide::{SlideId, SlideSequence};

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub index: usize,
    pub id: SlideId,
    pub current: bool,
    pub label: String,
}

/// Passive view of the navigation state: one marker per slide plus the
/// `"03 / 07"` counter.
#[derive(Debug, Clone)]
pub struct ProgressIndicator {
    slides: SlideSequence,
    current: usize,
}

impl ProgressIndicator {
    pub fn new(slides: SlideSequence) -> Self {
        Self { slides, current: 0 }
    }

    /// Creates an indicator that follows `session` through an observer.
    pub fn attach(session: &PresentationSession) -> (Rc<RefCell<Self>>, ObserverId) {
        let indicator = {
            let nav = session.controller();
            let mut indicator = Self::new(nav.slides().clone());
            indicator.set_current(nav.current_index());
            Rc::new(RefCell::new(indicator))
        };
        let sink = Rc::clone(&indicator);
        let id = session.subscribe(move |index| sink.borrow_mut().set_current(index));
        (indicator, id)
    }

    pub fn set_current(&mut self, index: usize) {
        if index < self.slides.len() {
            self.current = index;
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_id(&self) -> &SlideId {
        &self.slides[self.current]
    }

    pub fn markers(&self) -> Vec<Marker> {
        self.slides
            .iter()
            .enumerate()
            .map(|(index, id)| Marker {
                index,
                id: id.clone(),
                current: index == self.current,
                label: format!("Go to section {}", index + 1),
            })
            .collect()
    }

    pub fn counter(&self) -> String {
        format!("{:02} / {:02}", self.current + 1, self.slides.len())
    }
}

/// Vertical column of round markers, as drawn by the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotLayout {
    pub x: f32,
    pub center_y: f32,
    pub spacing: f32,
    pub radius: f32,
}

impl DotLayout {
    pub fn position(&self, index: usize, count: usize) -> (f32, f32) {
        let span = self.spacing * count.saturating_sub(1) as f32;
        let top = self.center_y - span / 2.0;
        (self.x, top + self.spacing * index as f32)
    }

    /// Marker under the point, if any. The hit area is a little larger than
    /// the dot itself.
    pub fn hit(&self, x: f32, y: f32, count: usize) -> Option<usize> {
        let reach = self.radius * 2.0;
        (0..count).find(|&index| {
            let (dx, dy) = self.position(index, count);
            (x - dx).powi(2) + (y - dy).powi(2) <= reach * reach
        })
    }
}
