//! Sparse sub-sampled template matching.
//!
//! Approximate matching chosen to avoid a full correlation or feature
//! library while tolerating anti-aliasing and minor rendering differences:
//! a sparse grid of reference pixels is compared against each candidate
//! window under a fixed per-channel tolerance, and a candidate qualifies
//! when the fraction of matching samples reaches the template's confidence
//! threshold.
//!
//! Cost is O((frame_area / SCAN_STRIDE^2) * sample_count) plus a
//! constant-size refinement around the best coarse hit.

use image::Rgb;

use autopermit_core::Point;

use crate::frame::Frame;
use crate::template::Template;

/// Scan stride of the coarse pass, in pixels, along both axes.
///
/// Candidate windows are visited on this grid rather than at every pixel,
/// trading completeness for throughput; the refinement pass recovers exact
/// alignment around the best qualifying coarse hit.
pub const SCAN_STRIDE: u32 = 3;

/// Maximum absolute per-channel difference for a sample pixel to count as
/// matching. A sample matches only if all three channels are within
/// tolerance.
pub const CHANNEL_TOLERANCE: u8 = 30;

/// A qualifying match for one (frame, template) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    /// Center of the matched window in absolute screen coordinates
    pub center: Point,
    /// Fraction of sample points within tolerance, in [0, 1]
    pub score: f32,
}

/// Locate a template inside a captured frame.
///
/// Returns the qualifying position with the highest match ratio, or `None`
/// if no position reaches the template's confidence threshold. Ties keep
/// the first hit in row-major scan order. A template larger than the frame
/// cannot match and yields `None` rather than an error.
///
/// Note: a template whose sampled pixels are all near one flat color can
/// false-positive on flat UI backgrounds within tolerance; the per-button
/// confidence threshold is the mitigation.
pub fn find(frame: &Frame, template: &Template) -> Option<Match> {
    if template.width() == 0 || template.height() == 0 {
        return None;
    }
    if template.width() > frame.width() || template.height() > frame.height() {
        return None;
    }

    let samples = sample_points(template);
    let max_x = frame.width() - template.width();
    let max_y = frame.height() - template.height();

    // Coarse pass: visit candidate windows on the scan-stride grid.
    let mut best: Option<(u32, u32, f32)> = None;
    let mut y = 0;
    while y <= max_y {
        let mut x = 0;
        while x <= max_x {
            let score = score_at(frame, &samples, x, y);
            if score >= template.confidence() && best.map_or(true, |(_, _, b)| score > b) {
                best = Some((x, y, score));
            }
            x += SCAN_STRIDE;
        }
        y += SCAN_STRIDE;
    }

    let (coarse_x, coarse_y, coarse_score) = best?;

    // Refinement: re-score every pixel offset within the stride
    // neighborhood of the coarse hit and keep the best.
    let (best_x, best_y, best_score) = refine(
        frame,
        &samples,
        (coarse_x, coarse_y, coarse_score),
        (max_x, max_y),
    );

    let center = frame.origin().translated(
        (best_x + template.width() / 2) as i32,
        (best_y + template.height() / 2) as i32,
    );

    tracing::trace!(
        template = template.name(),
        x = center.x,
        y = center.y,
        score = best_score,
        "template matched"
    );

    Some(Match {
        center,
        score: best_score,
    })
}

/// Sparse sample grid: template-local coordinates paired with their
/// reference pixels, on the template's sample stride.
fn sample_points(template: &Template) -> Vec<(u32, u32, Rgb<u8>)> {
    let stride = template.sample_stride() as usize;
    let mut samples = Vec::new();
    for y in (0..template.height()).step_by(stride) {
        for x in (0..template.width()).step_by(stride) {
            samples.push((x, y, template.pixel(x, y)));
        }
    }
    samples
}

/// Match ratio of the window at (x, y): fraction of sample points whose
/// frame pixel is within tolerance on all three channels.
fn score_at(frame: &Frame, samples: &[(u32, u32, Rgb<u8>)], x: u32, y: u32) -> f32 {
    let mut matching = 0usize;
    for &(sx, sy, reference) in samples {
        let actual = frame.pixel(x + sx, y + sy);
        if within_tolerance(actual[0], reference[0])
            && within_tolerance(actual[1], reference[1])
            && within_tolerance(actual[2], reference[2])
        {
            matching += 1;
        }
    }
    matching as f32 / samples.len() as f32
}

/// Single-pixel search of the stride neighborhood around the coarse hit.
/// Replaces only on strictly greater score, so ties keep the earlier
/// row-major position.
fn refine(
    frame: &Frame,
    samples: &[(u32, u32, Rgb<u8>)],
    (coarse_x, coarse_y, coarse_score): (u32, u32, f32),
    (max_x, max_y): (u32, u32),
) -> (u32, u32, f32) {
    let radius = SCAN_STRIDE - 1;
    let mut best = (coarse_x, coarse_y, coarse_score);
    for y in coarse_y.saturating_sub(radius)..=(coarse_y + radius).min(max_y) {
        for x in coarse_x.saturating_sub(radius)..=(coarse_x + radius).min(max_x) {
            if x == coarse_x && y == coarse_y {
                continue;
            }
            let score = score_at(frame, samples, x, y);
            if score > best.2 {
                best = (x, y, score);
            }
        }
    }
    best
}

fn within_tolerance(value: u8, reference: u8) -> bool {
    let min = reference.saturating_sub(CHANNEL_TOLERANCE);
    let max = reference.saturating_add(CHANNEL_TOLERANCE);
    value >= min && value <= max
}

#[cfg(test)]
mod tests {
    use super::*;
    use autopermit_core::ButtonAction;
    use image::RgbImage;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const RED: Rgb<u8> = Rgb([200, 30, 30]);
    const BLUE: Rgb<u8> = Rgb([50, 120, 200]);

    fn solid(width: u32, height: u32, color: Rgb<u8>) -> RgbImage {
        RgbImage::from_pixel(width, height, color)
    }

    /// Place the pattern's pixels verbatim into the frame buffer at (x, y).
    fn place(frame: &mut RgbImage, pattern: &RgbImage, x: u32, y: u32) {
        for py in 0..pattern.height() {
            for px in 0..pattern.width() {
                frame.put_pixel(x + px, y + py, *pattern.get_pixel(px, py));
            }
        }
    }

    fn template(image: RgbImage, confidence: f32) -> Template {
        Template::from_image("confirm", image, ButtonAction::Approve, confidence)
    }

    #[test]
    fn test_verbatim_placement_scores_one() {
        let pattern = solid(30, 12, RED);
        let mut background = solid(200, 100, WHITE);
        place(&mut background, &pattern, 60, 30);

        let frame = Frame::new(background, Point::origin());
        let m = find(&frame, &template(pattern, 0.8)).unwrap();

        assert_eq!(m.score, 1.0);
        assert_eq!(m.center, Point::new(75, 36));
    }

    #[test]
    fn test_center_uses_frame_origin() {
        let pattern = solid(30, 12, RED);
        let mut background = solid(200, 100, WHITE);
        place(&mut background, &pattern, 60, 30);

        let frame = Frame::new(background, Point::new(500, 300));
        let m = find(&frame, &template(pattern, 0.8)).unwrap();

        assert_eq!(m.center, Point::new(575, 336));
    }

    #[test]
    fn test_offset_not_on_scan_grid() {
        // 80x20 pattern at (100, 200) in a 1000x800 frame. Neither offset
        // is a multiple of the scan stride; the refinement pass recovers
        // the exact position.
        let pattern = solid(80, 20, BLUE);
        let mut background = solid(1000, 800, WHITE);
        place(&mut background, &pattern, 100, 200);

        let frame = Frame::new(background, Point::origin());
        let m = find(&frame, &template(pattern, 0.8)).unwrap();

        assert!(m.score >= 0.8);
        assert_eq!(m.center, Point::new(140, 210));
    }

    #[test]
    fn test_blank_frame_never_matches() {
        let frame = Frame::new(solid(200, 100, WHITE), Point::origin());
        assert!(find(&frame, &template(solid(30, 12, RED), 0.8)).is_none());
    }

    #[test]
    fn test_pattern_larger_than_frame_is_none() {
        let frame = Frame::new(solid(30, 30, WHITE), Point::origin());
        assert!(find(&frame, &template(solid(50, 50, WHITE), 0.5)).is_none());
    }

    #[test]
    fn test_empty_pattern_is_none() {
        let frame = Frame::new(solid(30, 30, WHITE), Point::origin());
        assert!(find(&frame, &template(RgbImage::new(0, 0), 0.5)).is_none());
    }

    #[test]
    fn test_tie_keeps_first_in_scan_order() {
        let pattern = solid(12, 12, RED);
        let mut background = solid(200, 40, WHITE);
        place(&mut background, &pattern, 0, 0);
        place(&mut background, &pattern, 60, 0);

        let frame = Frame::new(background, Point::origin());
        let m = find(&frame, &template(pattern, 0.8)).unwrap();

        // Both placements score 1.0; row-major scan order wins.
        assert_eq!(m.center, Point::new(6, 6));
    }

    #[test]
    fn test_tolerance_accepts_near_colors() {
        // 20 per channel off the reference, within the tolerance of 30.
        let frame = Frame::new(solid(100, 40, Rgb([120, 120, 120])), Point::origin());
        let m = find(&frame, &template(solid(20, 10, Rgb([100, 100, 100])), 0.8)).unwrap();
        assert_eq!(m.score, 1.0);
    }

    #[test]
    fn test_tolerance_rejects_far_colors() {
        // 45 per channel off the reference, beyond the tolerance of 30.
        let frame = Frame::new(solid(100, 40, Rgb([145, 145, 145])), Point::origin());
        assert!(find(&frame, &template(solid(20, 10, Rgb([100, 100, 100])), 0.8)).is_none());
    }

    #[test]
    fn test_partial_occlusion_below_threshold() {
        // Cover most of the placed pattern with background color; the match
        // ratio drops under the threshold.
        let pattern = solid(30, 12, RED);
        let mut background = solid(200, 100, WHITE);
        place(&mut background, &pattern, 60, 30);
        place(&mut background, &solid(24, 12, WHITE), 60, 30);

        let frame = Frame::new(background, Point::origin());
        assert!(find(&frame, &template(pattern, 0.8)).is_none());
    }
}
