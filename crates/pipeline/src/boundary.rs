//! Study-area boundaries
//!
//! A [`StudyArea`] is loaded once from a GeoJSON outline and never
//! mutated; reprojection into a raster's CRS happens on demand. Boundary
//! files come out of the municipal GIS repository in WGS84.

use crate::error::{PipelineError, Result};
use geo::{BoundingRect, Centroid, MapCoords};
use geo_types::{Coord, Geometry, Point};
use greentrace_core::crs::{project_point, CRS};
use greentrace_core::io::read_boundary_file;
use std::path::Path;

/// One conservation parcel: name, outline geometries, source CRS
#[derive(Debug, Clone)]
pub struct StudyArea {
    name: String,
    slug: String,
    geometries: Vec<Geometry<f64>>,
    crs: CRS,
}

impl StudyArea {
    /// Load a study area from a GeoJSON boundary file.
    ///
    /// The display name and output slug derive from the file stem
    /// (`Ergers_Pond.geojson` → "Ergers Pond" / `ergers_pond`). A file
    /// that is missing, unreadable, or contains zero geometries fails
    /// with [`PipelineError::BoundaryLoad`].
    pub fn from_geojson<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let collection = read_boundary_file(path).map_err(|e| PipelineError::BoundaryLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let geometries: Vec<Geometry<f64>> = collection.geometries().cloned().collect();
        if geometries.is_empty() {
            return Err(PipelineError::BoundaryLoad {
                path: path.to_path_buf(),
                reason: "boundary file contains no geometries".into(),
            });
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "study_area".into());

        Ok(Self {
            name: stem.replace('_', " "),
            slug: stem.to_lowercase(),
            geometries,
            crs: CRS::wgs84(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercased file-stem used for the per-area results subdirectory
    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn crs(&self) -> &CRS {
        &self.crs
    }

    pub fn geometries(&self) -> &[Geometry<f64>] {
        &self.geometries
    }

    /// Outline geometries reprojected into `target`.
    ///
    /// `None` or a CRS equivalent to the source is an identity mapping.
    pub fn projected_geometries(&self, target: Option<&CRS>) -> Result<Vec<Geometry<f64>>> {
        let Some(target) = target else {
            return Ok(self.geometries.clone());
        };
        if target.is_equivalent(&self.crs) {
            return Ok(self.geometries.clone());
        }

        self.geometries
            .iter()
            .map(|geom| {
                geom.try_map_coords(|c: Coord<f64>| {
                    let (x, y) = project_point(c.x, c.y, target)?;
                    Ok(Coord { x, y })
                })
                .map_err(PipelineError::Core)
            })
            .collect()
    }

    /// Total bounding box of the reprojected outline as
    /// (min_x, min_y, max_x, max_y)
    pub fn projected_bounds(&self, target: Option<&CRS>) -> Result<(f64, f64, f64, f64)> {
        let geometries = self.projected_geometries(target)?;

        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for geom in &geometries {
            if let Some(rect) = geom.bounding_rect() {
                let (min, max) = (rect.min(), rect.max());
                bounds = Some(match bounds {
                    None => (min.x, min.y, max.x, max.y),
                    Some((x0, y0, x1, y1)) => {
                        (x0.min(min.x), y0.min(min.y), x1.max(max.x), y1.max(max.y))
                    }
                });
            }
        }

        bounds.ok_or_else(|| PipelineError::BoundaryLoad {
            path: self.slug.clone().into(),
            reason: "boundary geometries have no extent".into(),
        })
    }

    /// Centroid of the first outline geometry, in the source CRS.
    ///
    /// Used for the cosine-latitude tick-label correction.
    pub fn centroid(&self) -> Option<Point<f64>> {
        self.geometries.first().and_then(|g| g.centroid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_boundary(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    const SQUARE: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {},
            "geometry": {
                "type": "Polygon",
                "coordinates": [[
                    [-104.83, 39.96], [-104.81, 39.96],
                    [-104.81, 39.98], [-104.83, 39.98],
                    [-104.83, 39.96]
                ]]
            }
        }]
    }"#;

    #[test]
    fn loads_name_and_slug_from_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_boundary(dir.path(), "Ergers_Pond.geojson", SQUARE);

        let area = StudyArea::from_geojson(&path).unwrap();
        assert_eq!(area.name(), "Ergers Pond");
        assert_eq!(area.slug(), "ergers_pond");
        assert_eq!(area.geometries().len(), 1);
    }

    #[test]
    fn missing_file_is_boundary_load_error() {
        let err = StudyArea::from_geojson("/nonexistent/area.geojson").unwrap_err();
        assert!(matches!(err, PipelineError::BoundaryLoad { .. }));
    }

    #[test]
    fn empty_collection_is_boundary_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_boundary(
            dir.path(),
            "empty.geojson",
            r#"{ "type": "FeatureCollection", "features": [] }"#,
        );

        let err = StudyArea::from_geojson(&path).unwrap_err();
        assert!(matches!(err, PipelineError::BoundaryLoad { .. }));
    }

    #[test]
    fn identity_projection_keeps_degrees() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_boundary(dir.path(), "a.geojson", SQUARE);
        let area = StudyArea::from_geojson(&path).unwrap();

        let (min_x, min_y, max_x, max_y) = area.projected_bounds(None).unwrap();
        assert!((min_x + 104.83).abs() < 1e-9);
        assert!((min_y - 39.96).abs() < 1e-9);
        assert!((max_x + 104.81).abs() < 1e-9);
        assert!((max_y - 39.98).abs() < 1e-9);
    }

    #[test]
    fn utm_projection_yields_metres() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_boundary(dir.path(), "a.geojson", SQUARE);
        let area = StudyArea::from_geojson(&path).unwrap();

        let target = CRS::utm(13, true);
        let (min_x, min_y, max_x, max_y) = area.projected_bounds(Some(&target)).unwrap();

        assert!(min_x > 100_000.0, "easting in metres, got {min_x}");
        assert!(min_y > 4_000_000.0, "northing in metres, got {min_y}");
        // ~0.02° of longitude at 40°N is ~1.7 km
        let width = max_x - min_x;
        assert!(width > 1_000.0 && width < 3_000.0, "width ~1.7km, got {width}");
        assert!(max_y > min_y);
    }

    #[test]
    fn centroid_is_inside_square() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_boundary(dir.path(), "a.geojson", SQUARE);
        let area = StudyArea::from_geojson(&path).unwrap();

        let c = area.centroid().unwrap();
        assert!((c.x() + 104.82).abs() < 1e-9);
        assert!((c.y() - 39.97).abs() < 1e-9);
    }
}
