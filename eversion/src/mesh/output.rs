//! Mesh output implementation
use super::Mesh;
use crate::Error;
use nalgebra::Vector3;
use std::io::{BufWriter, Write};

impl Mesh {
    /// Writes a binary STL to the given output
    pub fn write_stl<F: std::io::Write>(
        &self,
        out: &mut F,
    ) -> Result<(), Error> {
        // Lots of small writes, typically to a file
        let mut out = BufWriter::new(out);
        const HEADER: &[u8] = b"Sphere eversion exported by eversion";
        static_assertions::const_assert!(HEADER.len() <= 80);
        out.write_all(HEADER)?;
        out.write_all(&[0u8; 80 - HEADER.len()])?;
        out.write_all(&(self.triangles.len() as u32).to_le_bytes())?;
        for t in &self.triangles {
            let a = self.vertices[t.x];
            let b = self.vertices[t.y];
            let c = self.vertices[t.z];
            // Triangles touching the pole may have zero area
            let normal = (b - a)
                .cross(&(c - a))
                .try_normalize(0.0)
                .unwrap_or_else(Vector3::zeros);
            for p in &normal {
                out.write_all(&p.to_le_bytes())?;
            }
            for v in t {
                for p in &self.vertices[*v] {
                    out.write_all(&p.to_le_bytes())?;
                }
            }
            out.write_all(&[0u8; std::mem::size_of::<u16>()])?; // attributes
        }
        out.flush()?;
        Ok(())
    }

    /// Writes a Wavefront OBJ, including vertex normals
    pub fn write_obj<F: std::io::Write>(
        &self,
        out: &mut F,
    ) -> Result<(), Error> {
        let mut out = BufWriter::new(out);
        writeln!(out, "# Sphere eversion exported by eversion")?;
        for v in &self.vertices {
            writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
        }
        for n in &self.normals {
            writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
        }
        for t in &self.triangles {
            // OBJ indices are 1-based
            let [a, b, c] = [t.x + 1, t.y + 1, t.z + 1];
            writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?;
        }
        out.flush()?;
        Ok(())
    }
}
