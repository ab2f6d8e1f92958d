use super::constants::*;

/// CSS transform of the hero device for a given scroll position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroTilt {
    pub rotate_x_deg: f64,
    pub scale: f64,
}

impl HeroTilt {
    pub fn css(&self) -> String {
        format!("rotateX({}deg) scale({})", self.rotate_x_deg, self.scale)
    }
}

#[inline]
pub fn is_mobile(inner_width: f64) -> bool {
    inner_width <= MOBILE_MAX_WIDTH
}

/// Tilt eases out over the first `HERO_ANIMATION_DISTANCE` px of scroll:
/// rotateX 20deg -> 0deg, scale 1.05 -> 1.0 (0.7 -> 0.9 on mobile).
pub fn hero_tilt(scroll_y: f64, inner_width: f64) -> HeroTilt {
    let progress = (scroll_y.clamp(0.0, HERO_ANIMATION_DISTANCE)) / HERO_ANIMATION_DISTANCE;
    let (start, end) = if is_mobile(inner_width) {
        HERO_SCALE_MOBILE
    } else {
        HERO_SCALE_DESKTOP
    };
    HeroTilt {
        rotate_x_deg: HERO_ROTATE_START_DEG - progress * HERO_ROTATE_START_DEG,
        scale: start + progress * (end - start),
    }
}

/// Button press feedback transform.
pub fn button_transform(pressed: bool) -> String {
    let scale = if pressed { BUTTON_PRESS_SCALE } else { 1.0 };
    format!("scale({scale})")
}
