//! Packaging GLSL sources as inline HTML script blocks.
//!
//! The viewer loads its shaders from `<script type="x-shader/...">` tags in
//! a single HTML file. Each packaging run appends one block for one shader,
//! rewriting the desktop `#version 410 core` directive to the WebGL 2
//! `#version 300 es` equivalent. No other transformation is applied.

use crate::error::{DeployError, Result};
use camino::Utf8Path;
use log::{debug, warn};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;

const DESKTOP_PROFILE: &str = "410 core";
const WEBGL_PROFILE: &str = "300 es";

/// Pipeline stage a shader is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderKind {
    /// Vertex shader.
    Vertex,
    /// Fragment shader.
    Fragment,
}

impl ShaderKind {
    /// Classify a shader from its file name.
    ///
    /// Names whose stem (everything before the first `.`) contains `vertex`
    /// in any ASCII case, and files with a `.vert` extension, are vertex
    /// shaders. Everything else is a fragment shader.
    ///
    /// # Examples
    ///
    /// ```
    /// use meshviewer_webdeploy::shader::ShaderKind;
    ///
    /// assert_eq!(ShaderKind::from_file_name("fooVertex.glsl"), ShaderKind::Vertex);
    /// assert_eq!(ShaderKind::from_file_name("basic.vert"), ShaderKind::Vertex);
    /// assert_eq!(ShaderKind::from_file_name("lighting.glsl"), ShaderKind::Fragment);
    /// ```
    #[must_use]
    pub fn from_file_name(file_name: &str) -> Self {
        let is_vertex = file_stem(file_name).to_ascii_lowercase().contains("vertex")
            || Utf8Path::new(file_name).extension() == Some("vert");
        if is_vertex {
            Self::Vertex
        } else {
            Self::Fragment
        }
    }

    /// Return the MIME subtype used in the `type` attribute.
    #[must_use]
    pub const fn mime_subtype(self) -> &'static str {
        match self {
            Self::Vertex => "x-vertex",
            Self::Fragment => "x-fragment",
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        })
    }
}

/// A shader ready to be written as an HTML script block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderRecord {
    /// Value of the `id` attribute.
    pub id: String,
    /// Pipeline stage.
    pub kind: ShaderKind,
    /// GLSL source after profile rewriting.
    pub source: String,
}

impl ShaderRecord {
    /// Build a record from a shader's file name and raw source.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::InvalidShaderName`] when no identifier can be
    /// derived from `path`.
    pub fn new(path: &Utf8Path, source: &str) -> Result<Self> {
        let file_name = path
            .file_name()
            .ok_or_else(|| DeployError::InvalidShaderName {
                path: path.to_owned(),
            })?;
        let id = shader_id(file_name).ok_or_else(|| DeployError::InvalidShaderName {
            path: path.to_owned(),
        })?;

        Ok(Self {
            id,
            kind: ShaderKind::from_file_name(file_name),
            source: to_webgl(source),
        })
    }

    /// Render the record as the block appended to the HTML output.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use meshviewer_webdeploy::shader::ShaderRecord;
    ///
    /// let record = ShaderRecord::new(Utf8Path::new("flatVertex.glsl"), "void main() {}").unwrap();
    /// assert_eq!(
    ///     record.to_html(),
    ///     "\n<script id=\"flatVertex\" type=\"x-shader/x-vertex\">\nvoid main() {}\n</script>\n"
    /// );
    /// ```
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            "\n<script id=\"{}\" type=\"x-shader/{}\">\n{}\n</script>\n",
            self.id,
            self.kind.mime_subtype(),
            self.source
        )
    }
}

/// Derive the script `id` from a shader file name.
///
/// Everything from the first `.` is dropped. Files with a `.vert` or `.frag`
/// extension keep it as a suffix so a vertex and fragment pair sharing a
/// stem stay distinct. Returns `None` when the name starts with a `.`.
///
/// # Examples
///
/// ```
/// use meshviewer_webdeploy::shader::shader_id;
///
/// assert_eq!(shader_id("fooVertex.glsl").as_deref(), Some("fooVertex"));
/// assert_eq!(shader_id("phong.frag").as_deref(), Some("phong_frag"));
/// assert_eq!(shader_id(".glsl"), None);
/// ```
#[must_use]
pub fn shader_id(file_name: &str) -> Option<String> {
    let stem = file_stem(file_name);
    if stem.is_empty() {
        return None;
    }

    match Utf8Path::new(file_name).extension() {
        Some(ext @ ("vert" | "frag")) => Some(format!("{stem}_{ext}")),
        _ => Some(stem.to_owned()),
    }
}

fn file_stem(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or_default()
}

/// Rewrite every desktop GL profile tag to its WebGL 2 equivalent.
#[must_use]
pub fn to_webgl(source: &str) -> String {
    source.replace(DESKTOP_PROFILE, WEBGL_PROFILE)
}

/// Append `shader` to `html_output` as a script block.
///
/// The output file is created when missing. Packaging the same shader twice
/// appends two blocks; a warning is logged when the output already holds a
/// block with the same id.
///
/// # Errors
///
/// Returns [`DeployError::ShaderNotFound`] when `shader` is not a file,
/// [`DeployError::InvalidShaderName`] when no id can be derived, and
/// [`DeployError::WriteFailed`] when the output cannot be written.
pub fn package_shader(shader: &Utf8Path, html_output: &Utf8Path) -> Result<ShaderRecord> {
    if !shader.is_file() {
        return Err(DeployError::ShaderNotFound {
            path: shader.to_owned(),
        });
    }

    let source = fs::read_to_string(shader)?;
    let record = ShaderRecord::new(shader, &source)?;

    if contains_id(html_output, &record.id) {
        warn!(
            "{html_output} already contains a shader with id {:?}; appending another",
            record.id
        );
    }

    let mut output = OpenOptions::new()
        .create(true)
        .append(true)
        .open(html_output)
        .map_err(|source| DeployError::WriteFailed { source })?;
    output
        .write_all(record.to_html().as_bytes())
        .map_err(|source| DeployError::WriteFailed { source })?;

    debug!(
        "appended {} shader {} to {html_output}",
        record.kind, record.id
    );
    Ok(record)
}

fn contains_id(html_output: &Utf8Path, id: &str) -> bool {
    if !html_output.is_file() {
        return false;
    }
    match fs::read(html_output) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).contains(&format!("<script id=\"{id}\"")),
        Err(err) => {
            debug!("skipping duplicate check for {html_output}: {err}");
            false
        }
    }
}
