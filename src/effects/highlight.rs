use crate::foundation::core::centered_rect;
use crate::foundation::error::MockupResult;
use crate::params::perspective::HighlightEffect;
use crate::surface::{BlendMode, GradientStop, LinearGradient, Paint, Surface};

/// Diagonal sheen gradient: clear at both ends, peaking at `0.2 * intensity` alpha at 70%.
///
/// `angle` does not steer the gradient; it always runs top-left to bottom-right.
pub(crate) fn highlight_gradient(width: f64, height: f64, highlight: &HighlightEffect) -> LinearGradient {
    let rect = centered_rect(width, height);
    let intensity = highlight.intensity_or_default();
    let color = highlight.color_or_default();
    let stop = |offset: f64, alpha: f64| GradientStop {
        offset,
        color: color.with_alpha(color.a * alpha),
    };
    LinearGradient {
        start: rect.origin(),
        end: kurbo::Point::new(rect.x1, rect.y1),
        stops: vec![
            stop(0.0, 0.0),
            stop(0.3, intensity * 0.1),
            stop(0.7, intensity * 0.2),
            stop(1.0, 0.0),
        ],
    }
}

/// Overlay the sheen across the `width x height` rectangle centered on the origin.
pub fn draw_highlight<S: Surface + ?Sized>(
    surface: &mut S,
    width: f64,
    height: f64,
    highlight: &HighlightEffect,
) -> MockupResult<()> {
    let gradient = highlight_gradient(width, height, highlight);
    surface.fill_rect(
        centered_rect(width, height),
        &Paint::Linear(gradient),
        highlight.opacity_or_default(),
        BlendMode::Overlay,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/effects/highlight.rs"]
mod tests;
