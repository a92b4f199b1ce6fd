//! ASCII PLY persistence for point clouds.
//!
//! The header declares the format version, vertex count and a fixed property
//! schema (x, y, z as float; red, green, blue as uchar), followed by one
//! whitespace-separated record per vertex in that field order.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Lines, Write},
    path::Path,
    str::FromStr,
};

use log::info;

use crate::{
    data::{Point, PointCloud},
    Error,
};

pub fn write<P: AsRef<Path>>(cloud: &PointCloud, path: P) -> Result<(), Error> {
    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "ply")?;
    writeln!(writer, "format ascii 1.0")?;
    writeln!(writer, "element vertex {}", cloud.len())?;
    writeln!(writer, "property float x")?;
    writeln!(writer, "property float y")?;
    writeln!(writer, "property float z")?;
    writeln!(writer, "property uchar red")?;
    writeln!(writer, "property uchar green")?;
    writeln!(writer, "property uchar blue")?;
    writeln!(writer, "end_header")?;

    for point in cloud.iter() {
        writeln!(
            writer,
            "{:.6} {:.6} {:.6} {} {} {}",
            point.x, point.y, point.z, point.red, point.green, point.blue
        )?;
    }

    writer.flush()?;

    info!(
        "wrote {} vertices to {}",
        cloud.len(),
        path.as_ref().display()
    );

    Ok(())
}

pub fn load<P: AsRef<Path>>(path: P) -> Result<PointCloud, Error> {
    let file = File::open(&path)?;
    let mut lines = BufReader::new(file).lines();

    if read_line(&mut lines)?.trim() != "ply" {
        return Err(Error::Ply("missing ply magic".into()));
    }

    let format = read_line(&mut lines)?;

    if format.trim() != "format ascii 1.0" {
        return Err(Error::Ply(format!("unsupported format: {}", format.trim())));
    }

    let mut vertex_count = None;

    loop {
        let line = read_line(&mut lines)?;
        let line = line.trim();

        if line == "end_header" {
            break;
        }

        if let Some(count) = line.strip_prefix("element vertex ") {
            vertex_count = Some(parse_field(count)?);
        }

        // property and comment lines carry no information beyond the
        // fixed schema this module writes
    }

    let Some(vertex_count) = vertex_count else {
        return Err(Error::Ply("header declares no vertex element".into()));
    };

    let mut cloud = PointCloud::with_capacity(vertex_count);

    for index in 0..vertex_count {
        let line = read_line(&mut lines)?;
        let fields: Vec<&str> = line.split_whitespace().collect();

        if fields.len() != 6 {
            return Err(Error::Ply(format!(
                "vertex record {} has {} fields, expected 6",
                index,
                fields.len()
            )));
        }

        cloud.push(Point {
            x: parse_field(fields[0])?,
            y: parse_field(fields[1])?,
            z: parse_field(fields[2])?,
            red: parse_field(fields[3])?,
            green: parse_field(fields[4])?,
            blue: parse_field(fields[5])?,
        });
    }

    Ok(cloud)
}

fn read_line<R: BufRead>(lines: &mut Lines<R>) -> Result<String, Error> {
    match lines.next() {
        Some(line) => Ok(line?),
        None => Err(Error::Ply("unexpected end of file".into())),
    }
}

fn parse_field<T: FromStr>(field: &str) -> Result<T, Error> {
    field
        .parse()
        .map_err(|_| Error::Ply(format!("invalid numeric field: {field}")))
}
