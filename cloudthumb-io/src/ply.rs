//! PLY format support

use crate::{PointCloudDecoder, PointCloudReader};
use cloudthumb_core::{is_finite_point, narrow_point, Error, Point3d, Point3f, PointCloud, Result};
use log::debug;
use ply_rs::{
    parser::Parser,
    ply::{DefaultElement, Ply, Property},
};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads vertex positions from ASCII and binary PLY files
pub struct PlyReader;

impl PlyReader {
    fn parse<R: BufRead>(reader: &mut R) -> Result<PointCloud<Point3f>> {
        let parser = Parser::<DefaultElement>::new();
        let ply = parser
            .read_ply(reader)
            .map_err(|e| Error::Decode(format!("Malformed PLY data: {e}")))?;

        extract_positions(&ply)
    }
}

impl PointCloudDecoder for PlyReader {
    fn decode_point_cloud(bytes: &[u8]) -> Result<PointCloud<Point3f>> {
        let mut reader = bytes;
        Self::parse(&mut reader)
    }
}

impl PointCloudReader for PlyReader {
    fn read_point_cloud<P: AsRef<Path>>(path: P) -> Result<PointCloud<Point3f>> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::parse(&mut reader)
    }
}

fn extract_positions(ply: &Ply<DefaultElement>) -> Result<PointCloud<Point3f>> {
    let vertices = ply
        .payload
        .get("vertex")
        .ok_or_else(|| Error::Decode("PLY data has no vertex element".to_string()))?;

    let mut cloud = PointCloud::with_capacity(vertices.len());
    for (index, vertex) in vertices.iter().enumerate() {
        let x = extract_property_value(vertex, "x")?;
        let y = extract_property_value(vertex, "y")?;
        let z = extract_property_value(vertex, "z")?;

        let point = narrow_point(&Point3d::new(x, y, z));
        if !is_finite_point(&point) {
            return Err(Error::Decode(format!(
                "Vertex {index} has a non-finite coordinate"
            )));
        }
        cloud.push(point);
    }

    debug!("decoded {} PLY vertices", cloud.len());
    Ok(cloud)
}

/// Extract a scalar property value as f64 from a PLY element
fn extract_property_value(element: &DefaultElement, name: &str) -> Result<f64> {
    match element.get(name) {
        Some(Property::Double(val)) => Ok(*val),
        Some(Property::Float(val)) => Ok(f64::from(*val)),
        Some(Property::Int(val)) => Ok(f64::from(*val)),
        Some(Property::UInt(val)) => Ok(f64::from(*val)),
        Some(Property::Short(val)) => Ok(f64::from(*val)),
        Some(Property::UShort(val)) => Ok(f64::from(*val)),
        Some(Property::Char(val)) => Ok(f64::from(*val)),
        Some(Property::UChar(val)) => Ok(f64::from(*val)),
        Some(_) => Err(Error::Decode(format!(
            "Property '{name}' is a list, expected a scalar"
        ))),
        None => Err(Error::Decode(format!("Property '{name}' not found"))),
    }
}
