//! Two-step "flash" shown when a counter changes.
//!
//! [`apply_final_values`] jumps to the enlarged, faded state with transitions
//! off. [`settle`] turns transitions back on and returns to rest, so the
//! element animates. The two must run in separate ticks or the renderer only
//! ever sees the rest state.

use crate::dom::Element;

pub const SETTLED_TRANSITION: &str = "transform 0.2s ease, opacity 0.2s ease";

const PULSE_SCALE: &str = "scale(1.2)";
const PULSE_OPACITY: &str = "0.5";
const REST_SCALE: &str = "scale(1)";
const REST_OPACITY: &str = "1";

pub fn apply_final_values(counter: &dyn Element, new_count: i64) {
    counter.set_style("transition", "none");
    counter.set_style("transform", PULSE_SCALE);
    counter.set_style("opacity", PULSE_OPACITY);
    counter.set_text(&new_count.to_string());
}

pub fn settle(counter: &dyn Element) {
    counter.set_style("transition", SETTLED_TRANSITION);
    counter.set_style("transform", REST_SCALE);
    counter.set_style("opacity", REST_OPACITY);
}
