use std::io::Read;

use super::Error;

/// Frame Header / Start of Frame
#[derive(Debug)]
pub struct Sof {
    /// Sample precision
    pub p: u8,
    /// Number of lines
    pub y: u16,
    /// Number of samples per line
    pub x: u16,
    /// Component specification parameters
    pub parameters: Vec<ComponentSpecificationParameters>,
}

impl Sof {
    pub fn from_data(mut data: &[u8]) -> Result<Self, Error> {
        let p = data.read_u8().map_err(|_| Error::UnexpectedEof)?;
        let y = data.read_be_u16().map_err(|_| Error::UnexpectedEof)?;
        let x = data.read_be_u16().map_err(|_| Error::UnexpectedEof)?;
        let nf = data.read_u8().map_err(|_| Error::UnexpectedEof)?;

        let mut parameters = Vec::with_capacity(nf.into());
        let buf = &mut [0; 3];
        for _ in 0..nf {
            data.read_exact(buf).map_err(|_| Error::UnexpectedEof)?;
            parameters.push(ComponentSpecificationParameters::from_data(buf)?);
        }

        Ok(Self {
            p,
            y,
            x,
            parameters,
        })
    }

    pub fn width(&self) -> u32 {
        self.x.into()
    }

    pub fn height(&self) -> u32 {
        self.y.into()
    }
}

impl imgmeta_common::image::Dimensions for Sof {
    fn width(&self) -> u32 {
        Sof::width(self)
    }

    fn height(&self) -> u32 {
        Sof::height(self)
    }
}

/// Component specification parameters
#[derive(Debug, Clone, Copy)]
pub struct ComponentSpecificationParameters {
    /// Component identifier
    pub c: u8,
    /// Horizontal sampling factor
    pub h: u8,
    /// Vertical sampling factor
    pub v: u8,
    /// Quantization table destination selector
    pub tq: u8,
}

impl ComponentSpecificationParameters {
    pub fn from_data(mut data: &[u8]) -> Result<Self, Error> {
        let c = data.read_u8().map_err(|_| Error::UnexpectedEof)?;
        let h_v = data.read_u8().map_err(|_| Error::UnexpectedEof)?;
        let tq = data.read_u8().map_err(|_| Error::UnexpectedEof)?;

        let h = h_v >> 4;
        let v = h_v & 0b1111;

        Ok(Self { c, h, v, tq })
    }
}

pub trait ReadExt: Read {
    fn read_u8(&mut self) -> std::io::Result<u8> {
        let buf = &mut [0; 1];
        self.read_exact(buf)?;
        Ok(buf[0])
    }

    fn read_be_u16(&mut self) -> std::io::Result<u16> {
        let buf = &mut [0; 2];
        self.read_exact(buf)?;
        Ok(u16::from_be_bytes(*buf))
    }
}

impl<T: Read> ReadExt for T {}
