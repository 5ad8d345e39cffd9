//! Geometric primitive rasterization
//!
//! Pure integer geometry over a [`FrameBuffer`]. Every primitive
//! writes through [`FrameBuffer::set_pixel`] only, so the silent
//! clipping policy applies uniformly and nothing here knows about
//! device state.

use crate::framebuffer::{FrameBuffer, HEIGHT, WIDTH};

/// Draw a line with Bresenham's algorithm
///
/// Both endpoints are plotted, and the pixel set is the same
/// regardless of which endpoint is passed first.
pub fn draw_line(fb: &mut FrameBuffer, on: bool, x0: i16, y0: i16, x1: i16, y1: i16) {
    // Walk from a canonical endpoint so tie-breaking in the error term
    // cannot produce a different pixel set when the caller swaps ends.
    let ((x0, y0), (x1, y1)) = if (x1, y1) < (x0, y0) {
        ((x1, y1), (x0, y0))
    } else {
        ((x0, y0), (x1, y1))
    };

    let dx = (x1 as i32 - x0 as i32).abs();
    let dy = (y1 as i32 - y0 as i32).abs();
    let sx: i16 = if x0 < x1 { 1 } else { -1 };
    let sy: i16 = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    let (mut x, mut y) = (x0, y0);
    loop {
        fb.set_pixel(on, x, y);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = err + err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

/// Draw a rectangle outline
///
/// Oversized shapes are cropped to the visible area; shapes that end
/// up entirely off the buffer degrade to a no-op.
pub fn draw_rectangle(fb: &mut FrameBuffer, on: bool, x: i16, y: i16, w: i16, h: i16) {
    let Some((w, h)) = crop(x, y, w, h) else {
        return;
    };

    draw_line(fb, on, x, y, x + w, y); // Top line
    draw_line(fb, on, x, y + h, x + w, y + h); // Bottom line
    draw_line(fb, on, x, y, x, y + h); // Left line
    draw_line(fb, on, x + w, y, x + w, y + h); // Right line
}

/// Draw a filled rectangle as an inclusive horizontal sweep
pub fn draw_filled_rectangle(fb: &mut FrameBuffer, on: bool, x: i16, y: i16, w: i16, h: i16) {
    let Some((w, h)) = crop(x, y, w, h) else {
        return;
    };

    for i in 0..=h {
        draw_line(fb, on, x, y + i, x + w, y + i);
    }
}

/// Clamp a rectangle's extent to the visible area
///
/// Returns `None` when nothing of the shape can be visible.
fn crop(x: i16, y: i16, mut w: i16, mut h: i16) -> Option<(i16, i16)> {
    if w < 0 || h < 0 || x >= WIDTH as i16 || y >= HEIGHT as i16 {
        return None;
    }
    if x as i32 + w as i32 >= WIDTH as i32 {
        w = WIDTH as i16 - 1 - x;
    }
    if y as i32 + h as i32 >= HEIGHT as i32 {
        h = HEIGHT as i16 - 1 - y;
    }
    if w < 0 || h < 0 {
        return None;
    }
    Some((w, h))
}

/// Draw a circle outline with the midpoint algorithm
///
/// Plots with 8-way symmetry; `r == 0` plots the single center pixel.
pub fn draw_circle(fb: &mut FrameBuffer, on: bool, x0: i16, y0: i16, r: i16) {
    if r < 0 {
        return;
    }

    let mut x = r as i32;
    let mut y = 0i32;
    let mut err = 0i32;

    fb.set_pixel(on, x0, y0 + r);
    fb.set_pixel(on, x0, y0 - r);
    fb.set_pixel(on, x0 + r, y0);
    fb.set_pixel(on, x0 - r, y0);

    while x >= y {
        let (dx, dy) = (x as i16, y as i16);
        fb.set_pixel(on, x0 + dx, y0 + dy);
        fb.set_pixel(on, x0 - dx, y0 + dy);
        fb.set_pixel(on, x0 + dx, y0 - dy);
        fb.set_pixel(on, x0 - dx, y0 - dy);
        fb.set_pixel(on, x0 + dy, y0 + dx);
        fb.set_pixel(on, x0 - dy, y0 + dx);
        fb.set_pixel(on, x0 + dy, y0 - dx);
        fb.set_pixel(on, x0 - dy, y0 - dx);

        y += 1;
        err += 1 + 2 * y;

        if 2 * (err - x) + 1 > 0 {
            x -= 1;
            err += 1 - 2 * x;
        }
    }
}

/// Draw a filled circle from horizontal chords between symmetric points
pub fn draw_filled_circle(fb: &mut FrameBuffer, on: bool, x0: i16, y0: i16, r: i16) {
    if r < 0 {
        return;
    }

    let mut f = 1 - r as i32;
    let mut ddf_x = 1i32;
    let mut ddf_y = -2 * r as i32;
    let mut x = 0i32;
    let mut y = r as i32;

    fb.set_pixel(on, x0, y0 + r);
    fb.set_pixel(on, x0, y0 - r);
    fb.set_pixel(on, x0 + r, y0);
    fb.set_pixel(on, x0 - r, y0);
    draw_line(fb, on, x0 - r, y0, x0 + r, y0);

    while x < y {
        if f >= 0 {
            y -= 1;
            ddf_y += 2;
            f += ddf_y;
        }
        x += 1;
        ddf_x += 2;
        f += ddf_x;

        let (dx, dy) = (x as i16, y as i16);
        draw_line(fb, on, x0 - dx, y0 + dy, x0 + dx, y0 + dy);
        draw_line(fb, on, x0 + dx, y0 - dy, x0 - dx, y0 - dy);
        draw_line(fb, on, x0 + dy, y0 + dx, x0 - dy, y0 + dx);
        draw_line(fb, on, x0 + dy, y0 - dx, x0 - dy, y0 - dx);
    }
}
