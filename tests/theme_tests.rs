// Host-side tests for theme selection and the CPU reference of plane.wgsl.

use verse_stage::core::theme::{
    sample_index, spectrum_sample, ThemeName, BASE, BLUE, GREEN, INTRO_PLANE, RAVE, VIOLET,
};
use verse_stage::core::track::parse_tracks;
use verse_stage::core::TRACKS_JSON;

fn assert_rgb(actual: [f32; 3], expected: [f32; 3]) {
    for i in 0..3 {
        assert!(
            (actual[i] - expected[i]).abs() < 1e-5,
            "channel {}: {:?} != {:?}",
            i,
            actual,
            expected
        );
    }
}

#[test]
fn known_keys_select_their_theme() {
    assert_eq!(ThemeName::from_key(Some("rave")), ThemeName::Rave);
    assert_eq!(ThemeName::from_key(Some("blue")), ThemeName::Blue);
    assert_eq!(ThemeName::from_key(Some("green")), ThemeName::Green);
    assert_eq!(ThemeName::from_key(Some("violet")), ThemeName::Violet);
    assert_eq!(ThemeName::from_key(Some("base")), ThemeName::Base);
    // attribute values are trimmed and case-insensitive
    assert_eq!(ThemeName::from_key(Some("  RAVE ")), ThemeName::Rave);
}

#[test]
fn unknown_or_missing_keys_fall_back_to_base() {
    assert_eq!(ThemeName::from_key(None), ThemeName::Base);
    assert_eq!(ThemeName::from_key(Some("")), ThemeName::Base);
    assert_eq!(ThemeName::from_key(Some("plasma")), ThemeName::Base);
    assert_eq!(ThemeName::from_key(Some("rave2")), ThemeName::Base);
}

#[test]
fn every_configured_track_resolves_to_an_enumerated_theme() {
    let tracks = parse_tracks(TRACKS_JSON).unwrap();
    for t in &tracks {
        let theme = t.theme();
        assert!(ThemeName::ALL.contains(&theme));
        match t.shader.as_deref() {
            Some(key) if ThemeName::ALL.iter().any(|n| n.key() == key) => {
                assert_eq!(theme.key(), key)
            }
            _ => assert_eq!(theme, ThemeName::Base),
        }
    }
}

#[test]
fn theme_constants_are_kept_per_theme() {
    assert_eq!(INTRO_PLANE.divisor, 50.0);
    assert_eq!(INTRO_PLANE.threshold, 3.0);
    for t in [&BASE, &VIOLET, &GREEN] {
        assert_eq!(t.divisor, 30.0);
        assert_eq!(t.threshold, 3.0);
    }
    for t in [&RAVE, &BLUE] {
        assert_eq!(t.divisor, 30.0);
        assert_eq!(t.threshold, 2.9);
    }
    assert_eq!(ThemeName::Rave.theme(), &RAVE);
}

#[test]
fn sample_index_rounds_half_up_on_magnitude() {
    assert_eq!(sample_index(0.0), 0);
    assert_eq!(sample_index(2.4), 2);
    assert_eq!(sample_index(2.5), 3);
    assert_eq!(sample_index(-2.4), 2);
    assert_eq!(sample_index(-2.5), 3);
}

#[test]
fn samples_past_the_uniform_read_silence() {
    let spectrum = [255.0; 64];
    assert_eq!(spectrum_sample(&spectrum, 63.0), 255.0);
    assert_eq!(spectrum_sample(&spectrum, 63.6), 0.0);
    assert_eq!(spectrum_sample(&spectrum, -75.0), 0.0);
}

#[test]
fn displacement_matches_reference_values() {
    let mut spectrum = [0.0; 64];
    assert_eq!(BASE.displace(3.0, 7.0, &spectrum, 3.0), 0.0);

    spectrum[3] = 90.0;
    // y = 64 reads past the uniform: only x contributes
    let z = BASE.displace(3.0, 64.0, &spectrum, 3.0);
    assert!((z - (3.0f32).sin() * 3.0).abs() < 1e-5);

    spectrum[1] = 75.0;
    let z = INTRO_PLANE.displace(1.0, -1.0, &spectrum, 2.0);
    assert!((z - (3.0f32).sin() * 2.0).abs() < 1e-5);
}

#[test]
fn color_is_black_at_or_below_threshold() {
    assert_rgb(BASE.color(0.0, 0.0, 3.0), [0.0, 0.0, 0.0]);
    assert_rgb(BASE.color(0.0, 10.0, 2.95), [0.0, 0.0, 0.0]);
    assert_rgb(INTRO_PLANE.color(8.0, 16.0, -4.0), [0.0, 0.0, 0.0]);
    // rave's lower threshold lets the same height through
    assert_rgb(RAVE.color(0.0, 10.0, 2.95), [1.0, 22.0 / 64.0, 0.0]);
}

#[test]
fn palettes_match_reference_values() {
    assert_rgb(INTRO_PLANE.color(8.0, 16.0, 4.0), [0.75, 0.5, 0.375]);
    assert_rgb(BASE.color(0.0, 0.0, 3.5), [1.0, 1.0, 0.0]);
    assert_rgb(VIOLET.color(-8.0, 16.0, 3.5), [0.375, 0.5, 1.0]);
    assert_rgb(GREEN.color(8.0, -16.0, 3.5), [0.375, 1.0, 0.5]);
    assert_rgb(BLUE.color(0.0, 16.0, 4.0), [0.25 / 32.0, 0.25, 1.0]);
}

#[test]
fn blue_palette_at_zero_row_uses_full_red() {
    assert_rgb(BLUE.color(5.0, 0.0, 3.0), [1.0, 0.5, 1.0]);
    assert_rgb(BLUE.color(5.0, -0.0, 3.0), [1.0, 0.5, 1.0]);
}

#[test]
fn colors_are_clamped_to_unit_range() {
    // (32 - 40) / 32 would be negative
    assert_rgb(INTRO_PLANE.color(40.0, 0.0, 4.0), [0.0, 1.0, 0.625]);
    for t in ThemeName::ALL {
        let c = t.theme().color(-70.0, 70.0, 9.0);
        assert!(c.iter().all(|v| (0.0..=1.0).contains(v)), "{:?} {:?}", t, c);
    }
}
