use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use error_stack::{Report, ResultExt};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};

use crate::error::{InputError, OutputError};
use crate::geometry::Point;

/// File formats understood by the command line tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolylineFormat {
    /// Header `x,y`, one point per record.
    Csv,
    /// A LineString geometry, feature or feature collection.
    GeoJson,
}

impl PolylineFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(PolylineFormat::Csv),
            "geojson" | "json" => Some(PolylineFormat::GeoJson),
            _ => None,
        }
    }
}

fn ensure_finite(point: Point, position: usize) -> Result<Point, Report<InputError>> {
    if point.is_finite() {
        Ok(point)
    } else {
        Err(Report::new(InputError::NonFiniteCoordinate)
            .attach_printable(format!("point {}: ({}, {})", position, point.x, point.y)))
    }
}

/// Reads a polyline, picking the parser from the file extension.
pub fn read_points<P: AsRef<Path>>(path: P) -> Result<Vec<Point>, Report<InputError>> {
    let path = path.as_ref();
    match PolylineFormat::from_path(path) {
        Some(PolylineFormat::Csv) => read_points_csv(path),
        Some(PolylineFormat::GeoJson) => read_points_geojson(path),
        None => Err(Report::new(InputError::UnsupportedFormat)
            .attach_printable(format!("path: {}", path.display()))),
    }
}

pub fn read_points_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Point>, Report<InputError>> {
    let path = path.as_ref();
    let file = File::open(path)
        .change_context(InputError::Read)
        .attach_printable_lazy(|| format!("path: {}", path.display()))?;

    parse_points_csv(file).attach_printable_lazy(|| format!("path: {}", path.display()))
}

/// Parses `x,y` records. The header row is required.
pub fn parse_points_csv<R: Read>(reader: R) -> Result<Vec<Point>, Report<InputError>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut points = Vec::new();

    for (i, record) in reader.deserialize::<Point>().enumerate() {
        let point = record
            .change_context(InputError::Parse)
            .attach_printable_lazy(|| format!("record {}", i + 1))?;
        points.push(ensure_finite(point, i)?);
    }

    Ok(points)
}

pub fn read_points_geojson<P: AsRef<Path>>(path: P) -> Result<Vec<Point>, Report<InputError>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .change_context(InputError::Read)
        .attach_printable_lazy(|| format!("path: {}", path.display()))?;

    parse_points_geojson(&contents).attach_printable_lazy(|| format!("path: {}", path.display()))
}

/// Extracts the first LineString from a GeoJSON document.
pub fn parse_points_geojson(contents: &str) -> Result<Vec<Point>, Report<InputError>> {
    let geojson = contents.parse::<GeoJson>().change_context(InputError::Parse)?;

    let geometry = match geojson {
        GeoJson::Geometry(geometry) => Some(geometry),
        GeoJson::Feature(feature) => feature.geometry,
        GeoJson::FeatureCollection(collection) => collection.features
            .into_iter()
            .filter_map(|f| f.geometry)
            .find(|g| matches!(g.value, Value::LineString(_))),
    };

    let coordinates = match geometry.map(|g| g.value) {
        Some(Value::LineString(coordinates)) => coordinates,
        _ => return Err(Report::new(InputError::MissingLineString)),
    };

    coordinates.iter().enumerate()
        .map(|(i, position)| match position.as_slice() {
            [x, y, ..] => ensure_finite(Point::new(*x, *y), i),
            _ => Err(Report::new(InputError::Parse)
                .attach_printable(format!("position {} has {} values", i, position.len()))),
        })
        .collect()
}

pub fn to_geojson_feature(points: &[Point], properties: JsonObject) -> Feature {
    let coordinates: Vec<Vec<f64>> = points.iter().map(|p| vec![p.x, p.y]).collect();

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::LineString(coordinates))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

pub fn to_geojson(points: &[Point], properties: JsonObject) -> Result<String, Report<OutputError>> {
    let feature_collection = FeatureCollection {
        bbox: None,
        features: vec![to_geojson_feature(points, properties)],
        foreign_members: None,
    };

    serde_json::to_string_pretty(&feature_collection).change_context(OutputError::Serialize)
}

pub fn write_points_csv<W: Write>(writer: W, points: &[Point]) -> Result<(), Report<OutputError>> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(["x", "y"]).change_context(OutputError::Write)?;
    for point in points {
        let record = [point.x.to_string(), point.y.to_string()];
        writer.write_record(&record).change_context(OutputError::Write)?;
    }

    writer.flush().change_context(OutputError::Write)
}

/// Writes `points` to `path` as CSV or GeoJSON depending on the extension.
/// `properties` only end up in GeoJSON output.
pub fn write_points<P: AsRef<Path>>(path: P, points: &[Point], properties: JsonObject) -> Result<(), Report<OutputError>> {
    let path = path.as_ref();
    let attach_path = || format!("path: {}", path.display());

    match PolylineFormat::from_path(path) {
        Some(PolylineFormat::Csv) => {
            let file = File::create(path)
                .change_context(OutputError::Write)
                .attach_printable_lazy(attach_path)?;
            write_points_csv(file, points).attach_printable_lazy(attach_path)
        }
        Some(PolylineFormat::GeoJson) => {
            let geojson_string = to_geojson(points, properties)?;
            fs::write(path, geojson_string)
                .change_context(OutputError::Write)
                .attach_printable_lazy(attach_path)
        }
        None => Err(Report::new(OutputError::UnsupportedFormat).attach_printable(attach_path())),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_handlebar_csv() {
        let points = read_points("tests/fixtures/handlebar.csv").unwrap();
        assert_eq!(points.len(), 185);
        assert_eq!(points[0], Point::new(-34.0, 134.0));
        assert_eq!(points[184], Point::new(30.0, 12.0));
    }

    #[test]
    fn test_read_geojson_feature_collection() {
        let points = read_points("tests/fixtures/random_line.geojson").unwrap();
        assert_eq!(points.len(), 11);
        assert_eq!(points[3], Point::new(198.0, 28.0));
        assert_eq!(points[10], Point::new(638.0, 140.0));
    }

    #[test]
    fn test_parse_bare_geometry() {
        let points = parse_points_geojson(
            r#"{"type": "LineString", "coordinates": [[0, 0], [1.5, 2, 100], [3, -1]]}"#
        ).unwrap();
        assert_eq!(points, vec![Point::new(0.0, 0.0), Point::new(1.5, 2.0), Point::new(3.0, -1.0)]);
    }

    #[test]
    fn test_missing_linestring() {
        let err = parse_points_geojson(r#"{"type": "Point", "coordinates": [1, 2]}"#).unwrap_err();
        assert_eq!(err.current_context(), &InputError::MissingLineString);
    }

    #[test]
    fn test_invalid_geojson() {
        let err = parse_points_geojson("not json").unwrap_err();
        assert_eq!(err.current_context(), &InputError::Parse);
    }

    #[test]
    fn test_csv_rejects_non_finite() {
        let err = parse_points_csv("x,y\n0,0\nNaN,1\n".as_bytes()).unwrap_err();
        assert_eq!(err.current_context(), &InputError::NonFiniteCoordinate);
    }

    #[test]
    fn test_csv_rejects_garbage() {
        let err = parse_points_csv("x,y\n0,zero\n".as_bytes()).unwrap_err();
        assert_eq!(err.current_context(), &InputError::Parse);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = read_points("tests/fixtures/handlebar.txt").unwrap_err();
        assert_eq!(err.current_context(), &InputError::UnsupportedFormat);
        assert_eq!(PolylineFormat::from_path(Path::new("a/b.GeoJSON")), Some(PolylineFormat::GeoJson));
        assert_eq!(PolylineFormat::from_path(Path::new("no_extension")), None);
    }

    #[test]
    fn test_missing_file() {
        let err = read_points("tests/fixtures/does_not_exist.csv").unwrap_err();
        assert_eq!(err.current_context(), &InputError::Read);
    }

    #[test]
    fn test_write_csv() {
        let mut buffer = Vec::new();
        write_points_csv(&mut buffer, &[Point::new(0.0, 0.0), Point::new(1.5, -2.0)]).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "x,y\n0,0\n1.5,-2\n");
    }

    #[test]
    fn test_geojson_output_is_readable() {
        let points = vec![Point::new(0.0, 0.0), Point::new(198.0, 28.0), Point::new(638.0, 140.0)];
        let mut properties = JsonObject::new();
        properties.insert(String::from("tolerance"), serde_json::Value::from(30.0));

        let geojson_string = to_geojson(&points, properties).unwrap();
        assert!(geojson_string.contains("\"tolerance\""));
        assert_eq!(parse_points_geojson(&geojson_string).unwrap(), points);
    }
}
