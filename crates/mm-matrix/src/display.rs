use std::fmt;

use half::f16;

use crate::element::Element;
use crate::matrix::Matrix;

/// Per-type rendering of a single matrix cell.
pub trait ElementFormat: Element {
    fn fmt_cell(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

macro_rules! impl_format_integral {
    ($($t:ty),*) => {
        $(
            impl ElementFormat for $t {
                fn fmt_cell(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{:4}", self)
                }
            }
        )*
    };
}

impl_format_integral!(i8, i16, i32, i64, i128, isize);

impl ElementFormat for f32 {
    fn fmt_cell(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:8.3}", self)
    }
}

impl ElementFormat for f64 {
    fn fmt_cell(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:8.3}", self)
    }
}

impl ElementFormat for f16 {
    fn fmt_cell(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:8.3}", self.to_f32())
    }
}

/// Human-readable view of a matrix, returned by [`Matrix::display`].
pub struct MatrixDisplay<'a, T: ElementFormat> {
    matrix: &'a Matrix<T>,
    label: Option<&'a str>,
    contents: bool,
}

impl<T: ElementFormat> MatrixDisplay<'_, T> {
    /// Print only the shape line and trailer when `false`.
    pub fn with_contents(mut self, contents: bool) -> Self {
        self.contents = contents;
        self
    }
}

impl<T: ElementFormat> fmt::Display for MatrixDisplay<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.matrix;
        if let Some(label) = self.label {
            write!(f, "{}: ", label)?;
        }
        writeln!(f, "nRows = {}; nCols = {}", m.rows(), m.cols())?;
        if self.contents {
            for row in m.as_slice().chunks(m.cols()) {
                for (j, x) in row.iter().enumerate() {
                    if j > 0 {
                        write!(f, " ")?;
                    }
                    x.fmt_cell(f)?;
                }
                writeln!(f)?;
            }
        }
        write!(f, "----")
    }
}

impl<T: ElementFormat> Matrix<T> {
    /// Display adapter printing the shape, the rows, and a `----` trailer.
    pub fn display<'a>(&'a self, label: Option<&'a str>) -> MatrixDisplay<'a, T> {
        MatrixDisplay {
            matrix: self,
            label,
            contents: true,
        }
    }
}
