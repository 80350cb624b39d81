//! Landsat scene-name parsing
//!
//! Collection-2 Level-2 surface-reflectance products use fixed-width
//! positional names:
//!
//! ```text
//! LC08_L2SP_033032_20200712_20200722_02_T1_SR_B4.TIF
//!    ^              ^^^^^^^^                      ^
//!    platform       acquisition date              band index
//!    (offset 3)     (offset 17, 8 chars)          (5th char from end)
//! ```
//!
//! Parsing is pure and never touches the filesystem; the caller decides
//! what to do with each classification. The platform→band-role mapping
//! is a fixed lookup over sensor generations, not inferred from data.

use chrono::NaiveDate;
use greentrace_algorithms::temporal::BandRole;

/// Parsed metadata for a usable red/nir observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneMeta {
    pub platform: u8,
    pub band_index: u8,
    pub role: BandRole,
    pub date: NaiveDate,
}

/// Why a filename was passed over without producing an observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Not a Collection-2 surface-reflectance band file at all
    NotSurfaceReflectance,
    /// Platform position does not hold a digit
    Platform,
    /// Band position does not hold a digit
    Band,
    /// Date substring does not parse as yyyymmdd
    Date,
}

/// Classification of one filename
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneClass {
    /// A red or near-infrared observation candidate
    Observation(SceneMeta),
    /// Well-formed product name carrying a band this pipeline never
    /// uses; subject to the selector's discard policy
    IrrelevantBand { platform: u8, band_index: u8 },
    /// Skipped without side effects
    Skip(SkipReason),
}

/// Band role for a platform/band-index pair.
///
/// Landsat 4-7 (TM/ETM+): band 3 = red, band 4 = near-infrared.
/// Landsat 8-9 (OLI): band 4 = red, band 5 = near-infrared.
pub fn band_role(platform: u8, band_index: u8) -> Option<BandRole> {
    if platform < 8 {
        match band_index {
            3 => Some(BandRole::Red),
            4 => Some(BandRole::Nir),
            _ => None,
        }
    } else {
        match band_index {
            4 => Some(BandRole::Red),
            5 => Some(BandRole::Nir),
            _ => None,
        }
    }
}

const DATE_OFFSET: usize = 17;
const DATE_LEN: usize = 8;

/// Parse one filename into a [`SceneClass`].
///
/// Check order mirrors the selection loop: product shape, platform
/// digit, band digit, band relevance, then the acquisition date. A
/// relevant band with a bad date is a skip, not a discard.
pub fn parse_scene_name(name: &str) -> SceneClass {
    if !name.is_ascii()
        || !name.ends_with(".TIF")
        || !name.contains("_L2SP_")
        || !name.contains("_SR_B")
        || name.len() < DATE_OFFSET + DATE_LEN
    {
        return SceneClass::Skip(SkipReason::NotSurfaceReflectance);
    }

    let bytes = name.as_bytes();

    let platform = match (bytes[3] as char).to_digit(10) {
        Some(d) => d as u8,
        None => return SceneClass::Skip(SkipReason::Platform),
    };

    let band_index = match (bytes[name.len() - 5] as char).to_digit(10) {
        Some(d) => d as u8,
        None => return SceneClass::Skip(SkipReason::Band),
    };

    let Some(role) = band_role(platform, band_index) else {
        return SceneClass::IrrelevantBand {
            platform,
            band_index,
        };
    };

    let date_field = &name[DATE_OFFSET..DATE_OFFSET + DATE_LEN];
    let Ok(date) = NaiveDate::parse_from_str(date_field, "%Y%m%d") else {
        return SceneClass::Skip(SkipReason::Date);
    };

    SceneClass::Observation(SceneMeta {
        platform,
        band_index,
        role,
        date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_oli_red_band() {
        let class = parse_scene_name("LC08_L2SP_033032_20200712_20200722_02_T1_SR_B4.TIF");
        match class {
            SceneClass::Observation(meta) => {
                assert_eq!(meta.platform, 8);
                assert_eq!(meta.band_index, 4);
                assert_eq!(meta.role, BandRole::Red);
                assert_eq!(meta.date, date(2020, 7, 12));
            }
            other => panic!("expected observation, got {:?}", other),
        }
    }

    #[test]
    fn parses_tm_bands() {
        // Landsat 5: band 3 is red, band 4 is near-infrared
        match parse_scene_name("LT05_L2SP_033032_19900617_20200820_02_T1_SR_B3.TIF") {
            SceneClass::Observation(meta) => assert_eq!(meta.role, BandRole::Red),
            other => panic!("expected observation, got {:?}", other),
        }
        match parse_scene_name("LT05_L2SP_033032_19900617_20200820_02_T1_SR_B4.TIF") {
            SceneClass::Observation(meta) => assert_eq!(meta.role, BandRole::Nir),
            other => panic!("expected observation, got {:?}", other),
        }
    }

    #[test]
    fn landsat9_nir_is_band5() {
        match parse_scene_name("LC09_L2SP_033032_20220701_20220711_02_T1_SR_B5.TIF") {
            SceneClass::Observation(meta) => {
                assert_eq!(meta.platform, 9);
                assert_eq!(meta.role, BandRole::Nir);
            }
            other => panic!("expected observation, got {:?}", other),
        }
    }

    #[test]
    fn landsat9_band3_is_irrelevant() {
        let class = parse_scene_name("LC09_L2SP_033032_20220701_20220711_02_T1_SR_B3.TIF");
        assert_eq!(
            class,
            SceneClass::IrrelevantBand {
                platform: 9,
                band_index: 3
            }
        );
    }

    #[test]
    fn thermal_band_on_tm_is_irrelevant() {
        let class = parse_scene_name("LT05_L2SP_033032_19900617_20200820_02_T1_SR_B6.TIF");
        assert_eq!(
            class,
            SceneClass::IrrelevantBand {
                platform: 5,
                band_index: 6
            }
        );
    }

    #[test]
    fn bad_date_skips_without_discard() {
        // Band is relevant, date field is garbage: skip, never delete
        let class = parse_scene_name("LC08_L2SP_033032_2020XX12_20200722_02_T1_SR_B4.TIF");
        assert_eq!(class, SceneClass::Skip(SkipReason::Date));
    }

    #[test]
    fn impossible_calendar_date_skips() {
        let class = parse_scene_name("LC08_L2SP_033032_20201345_20200722_02_T1_SR_B4.TIF");
        assert_eq!(class, SceneClass::Skip(SkipReason::Date));
    }

    #[test]
    fn unrelated_files_are_not_surface_reflectance() {
        assert_eq!(
            parse_scene_name("readme.txt"),
            SceneClass::Skip(SkipReason::NotSurfaceReflectance)
        );
        assert_eq!(
            parse_scene_name("LC08_L2SP_033032_20200712_20200722_02_T1_QA_PIXEL.TIF"),
            SceneClass::Skip(SkipReason::NotSurfaceReflectance)
        );
        // Lowercase extension is not the product convention
        assert_eq!(
            parse_scene_name("LC08_L2SP_033032_20200712_20200722_02_T1_SR_B4.tif"),
            SceneClass::Skip(SkipReason::NotSurfaceReflectance)
        );
    }

    #[test]
    fn non_digit_platform_skips() {
        assert_eq!(
            parse_scene_name("LCXX_L2SP_033032_20200712_20200722_02_T1_SR_B4.TIF"),
            SceneClass::Skip(SkipReason::Platform)
        );
    }

    #[test]
    fn non_digit_band_skips() {
        assert_eq!(
            parse_scene_name("LC08_L2SP_033032_20200712_20200722_02_T1_SR_BX.TIF"),
            SceneClass::Skip(SkipReason::Band)
        );
    }
}
