//! Rendition path resolution.
//!
//! Maps an original asset path to the paths of its derived renditions, and
//! (best effort) a rendition path back to the original it was generated
//! from. Everything here is pure string manipulation over slash-separated
//! paths; no file is ever touched.
//!
//! ## Layout
//!
//! For an asset `photos/a.png` with renditions root `_renditions`:
//!
//! - thumbnail: `_renditions/images/photos/a_thumb.png`
//! - jpeg rendition (png/gif sources only): `_renditions/images/photos/a.jpg`
//!
//! Drawings (`drawings/x.svg`) fan out to both `x.jpg` and `x.png` under
//! `_renditions/drawings/...`.

use serde::{Deserialize, Serialize};

use crate::errors::{AssetLibError, Result};
use crate::model::AssetKind;

/// Placeholder substituted with the original file stem in thumbnail names
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Source extensions that get a flattened jpeg preview
const JPEG_SOURCE_EXTENSIONS: &[&str] = &[".png", ".gif"];

/// Naming scheme for renditions.
///
/// Passed explicitly to the resolver so different naming schemes can be
/// reconciled side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenditionConfig {
    /// Thumbnail file name without extension; must contain `{name}`
    pub thumbnail_template: String,
    pub thumbnail_extension: String,
    pub jpeg_extension: String,
    /// Extension of the second raster rendition of a drawing
    pub png_extension: String,
    /// Extension assumed when mapping an image rendition back to its source
    pub image_source_extension: String,
    /// Extension assumed when mapping a drawing rendition back to its source
    pub drawing_source_extension: String,
}

impl Default for RenditionConfig {
    fn default() -> Self {
        Self {
            thumbnail_template: "{name}_thumb".to_string(),
            thumbnail_extension: ".png".to_string(),
            jpeg_extension: ".jpg".to_string(),
            png_extension: ".png".to_string(),
            image_source_extension: ".png".to_string(),
            drawing_source_extension: ".svg".to_string(),
        }
    }
}

impl RenditionConfig {
    /// Check the template and extensions.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when the template lacks exactly one `{name}`
    /// placeholder or contains a `/`, or when an extension does not start
    /// with a dot.
    pub fn validate(&self) -> Result<()> {
        if self.thumbnail_template.matches(NAME_PLACEHOLDER).count() != 1 {
            return Err(AssetLibError::InvalidConfig {
                reason: format!(
                    "thumbnail_template `{}` must contain `{}` exactly once",
                    self.thumbnail_template, NAME_PLACEHOLDER
                ),
            });
        }
        if self.thumbnail_template.contains('/') {
            return Err(AssetLibError::InvalidConfig {
                reason: "thumbnail_template must be a file name, not a path".to_string(),
            });
        }
        let extensions = [
            ("thumbnail_extension", &self.thumbnail_extension),
            ("jpeg_extension", &self.jpeg_extension),
            ("png_extension", &self.png_extension),
            ("image_source_extension", &self.image_source_extension),
            ("drawing_source_extension", &self.drawing_source_extension),
        ];
        for (field, ext) in extensions {
            if !ext.starts_with('.') || ext.len() < 2 || ext.contains('/') {
                return Err(AssetLibError::InvalidConfig {
                    reason: format!("{field} `{ext}` must look like `.ext`"),
                });
            }
        }
        Ok(())
    }
}

/// Pure mapping between original asset paths and rendition paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenditionPathResolver {
    config: RenditionConfig,
}

impl RenditionPathResolver {
    /// # Errors
    ///
    /// `InvalidConfig` if the naming scheme fails [`RenditionConfig::validate`].
    pub fn new(config: RenditionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RenditionConfig {
        &self.config
    }

    /// Scope prefix of one kind's renditions, always ending in `/`
    pub fn kind_root(&self, renditions_root: &str, kind: AssetKind) -> String {
        let mut root = join_normalized(&[renditions_root, kind.folder()]);
        root.push('/');
        root
    }

    pub fn thumbnail_path(&self, original: &str, renditions_root: &str, kind: AssetKind) -> String {
        let (dir, name) = split_dir_name(original);
        let thumb = format!(
            "{}{}",
            self.config
                .thumbnail_template
                .replace(NAME_PLACEHOLDER, file_stem(name)),
            self.config.thumbnail_extension
        );
        join_normalized(&[renditions_root, kind.folder(), dir, &thumb])
    }

    pub fn jpeg_rendition_path(
        &self,
        original: &str,
        renditions_root: &str,
        kind: AssetKind,
    ) -> String {
        self.with_extension(original, renditions_root, kind, &self.config.jpeg_extension)
    }

    /// Second raster rendition produced from vector drawings
    pub fn png_rendition_path(
        &self,
        original: &str,
        renditions_root: &str,
        kind: AssetKind,
    ) -> String {
        self.with_extension(original, renditions_root, kind, &self.config.png_extension)
    }

    /// Best-effort inverse of the forward mappings.
    ///
    /// Strips `<root>/<kind>/`, undoes the thumbnail template when the name
    /// matches it, and restores the configured source extension for the
    /// kind. Several renditions map to one original and an image source may
    /// really have been `.gif` rather than `.png`, so the result is a
    /// candidate only. Returns `None` for paths outside the kind's scope.
    pub fn original_from_rendition_path(
        &self,
        rendition: &str,
        renditions_root: &str,
        kind: AssetKind,
    ) -> Option<String> {
        let scope = self.kind_root(renditions_root, kind);
        let normalized = collapse_separators(rendition);
        let relative = normalized.strip_prefix(&scope)?;
        let (dir, name) = split_dir_name(relative);
        if name.is_empty() {
            return None;
        }

        let base = self.untemplate_thumbnail(name).unwrap_or(file_stem(name));
        let source_ext = match kind {
            AssetKind::Image => &self.config.image_source_extension,
            AssetKind::Drawing => &self.config.drawing_source_extension,
        };
        let file = format!("{base}{source_ext}");
        Some(normalize_path(&join_normalized(&[dir, &file])))
    }

    /// Whether the asset gets a flattened jpeg preview (png and gif sources)
    pub fn needs_jpeg_rendition(&self, original: &str) -> bool {
        let (_, name) = split_dir_name(original);
        let lower = name.to_ascii_lowercase();
        JPEG_SOURCE_EXTENSIONS
            .iter()
            .any(|ext| lower.len() > ext.len() && lower.ends_with(ext))
    }

    /// Every rendition a live asset keeps in use, without duplicates
    pub fn expected_renditions(
        &self,
        original: &str,
        renditions_root: &str,
        kind: AssetKind,
    ) -> Vec<String> {
        let mut paths = vec![self.thumbnail_path(original, renditions_root, kind)];
        let mut push = |p: String| {
            if !paths.contains(&p) {
                paths.push(p);
            }
        };
        if self.needs_jpeg_rendition(original) {
            push(self.jpeg_rendition_path(original, renditions_root, kind));
        }
        if kind == AssetKind::Drawing {
            push(self.jpeg_rendition_path(original, renditions_root, kind));
            push(self.png_rendition_path(original, renditions_root, kind));
        }
        paths
    }

    fn with_extension(
        &self,
        original: &str,
        renditions_root: &str,
        kind: AssetKind,
        extension: &str,
    ) -> String {
        let (dir, name) = split_dir_name(original);
        let file = format!("{}{}", file_stem(name), extension);
        join_normalized(&[renditions_root, kind.folder(), dir, &file])
    }

    fn untemplate_thumbnail<'a>(&self, name: &'a str) -> Option<&'a str> {
        let ext = &self.config.thumbnail_extension;
        if name.len() <= ext.len() || !name.to_ascii_lowercase().ends_with(&ext.to_ascii_lowercase())
        {
            return None;
        }
        let stem = &name[..name.len() - ext.len()];
        let (prefix, suffix) = self.config.thumbnail_template.split_once(NAME_PLACEHOLDER)?;
        let inner = stem.strip_prefix(prefix)?.strip_suffix(suffix)?;
        (!inner.is_empty()).then_some(inner)
    }
}

/// Join path segments with `/`, collapsing duplicate separators.
///
/// Empty segments are skipped. A leading `/` on the first non-empty segment
/// is preserved.
pub fn join_normalized(parts: &[&str]) -> String {
    let joined = parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/");
    collapse_separators(&joined)
}

/// Canonical form used when comparing paths from different sources:
/// duplicate separators collapsed, leading and trailing `/` removed.
pub fn normalize_path(path: &str) -> String {
    collapse_separators(path).trim_matches('/').to_string()
}

/// Normalized path with the file extension removed, e.g. `a/b.jpg` -> `a/b`.
///
/// The inverse rendition mapping cannot know an image's real source
/// extension, so owners are compared on this form.
pub fn strip_extension(path: &str) -> String {
    let normalized = normalize_path(path);
    let (dir, name) = split_dir_name(&normalized);
    join_normalized(&[dir, file_stem(name)])
}

fn collapse_separators(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut last_was_sep = false;
    for c in path.chars() {
        if c == '/' {
            if !last_was_sep {
                out.push(c);
            }
            last_was_sep = true;
        } else {
            out.push(c);
            last_was_sep = false;
        }
    }
    out
}

fn split_dir_name(path: &str) -> (&str, &str) {
    path.rsplit_once('/').unwrap_or(("", path))
}

fn file_stem(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> RenditionPathResolver {
        RenditionPathResolver::default()
    }

    #[test]
    fn test_thumbnail_path_keeps_directory() {
        let r = resolver();
        assert_eq!(
            r.thumbnail_path("photos/2024/a.png", "_renditions", AssetKind::Image),
            "_renditions/images/photos/2024/a_thumb.png"
        );
    }

    #[test]
    fn test_joins_collapse_duplicate_separators() {
        let r = resolver();
        assert_eq!(
            r.thumbnail_path("/photos//a.gif", "_renditions/", AssetKind::Image),
            "_renditions/images/photos/a_thumb.png"
        );
        assert_eq!(join_normalized(&["/root/", "", "/x"]), "/root/x");
    }

    #[test]
    fn test_jpeg_rendition_forces_extension() {
        let r = resolver();
        assert_eq!(
            r.jpeg_rendition_path("a.gif", "_r", AssetKind::Image),
            "_r/images/a.jpg"
        );
        assert!(r.needs_jpeg_rendition("x/A.PNG"));
        assert!(r.needs_jpeg_rendition("b.gif"));
        assert!(!r.needs_jpeg_rendition("c.jpg"));
        assert!(!r.needs_jpeg_rendition(".png"));
    }

    #[test]
    fn test_drawing_fans_out_to_two_rasters() {
        let r = resolver();
        let paths = r.expected_renditions("diagrams/x.svg", "_r", AssetKind::Drawing);
        assert_eq!(
            paths,
            vec![
                "_r/drawings/diagrams/x_thumb.png".to_string(),
                "_r/drawings/diagrams/x.jpg".to_string(),
                "_r/drawings/diagrams/x.png".to_string(),
            ]
        );
    }

    #[test]
    fn test_jpeg_only_for_png_and_gif_images() {
        let r = resolver();
        assert_eq!(
            r.expected_renditions("a.jpg", "_r", AssetKind::Image),
            vec!["_r/images/a_thumb.png".to_string()]
        );
        assert_eq!(r.expected_renditions("a.png", "_r", AssetKind::Image).len(), 2);
    }

    #[test]
    fn test_inverse_undoes_thumbnail_template() {
        let r = resolver();
        assert_eq!(
            r.original_from_rendition_path("_r/images/photos/a_thumb.png", "_r", AssetKind::Image)
                .as_deref(),
            Some("photos/a.png")
        );
        assert_eq!(
            r.original_from_rendition_path("_r/drawings/d/x.jpg", "_r", AssetKind::Drawing)
                .as_deref(),
            Some("d/x.svg")
        );
        assert_eq!(
            r.original_from_rendition_path("_r/drawings/x_thumb.png", "_r", AssetKind::Drawing)
                .as_deref(),
            Some("x.svg")
        );
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("photos/a.jpg"), "photos/a");
        assert_eq!(strip_extension("//photos//a.tar.gz"), "photos/a.tar");
        assert_eq!(strip_extension("README"), "README");
        assert_eq!(strip_extension("v1.2/.hidden"), "v1.2/.hidden");
    }

    #[test]
    fn test_inverse_outside_scope_is_none() {
        let r = resolver();
        assert_eq!(
            r.original_from_rendition_path("_r/drawings/x.jpg", "_r", AssetKind::Image),
            None
        );
        assert_eq!(
            r.original_from_rendition_path("elsewhere/x.jpg", "_r", AssetKind::Image),
            None
        );
    }

    #[test]
    fn test_custom_template() {
        let config = RenditionConfig {
            thumbnail_template: "tn_{name}".to_string(),
            thumbnail_extension: ".jpg".to_string(),
            ..RenditionConfig::default()
        };
        let r = RenditionPathResolver::new(config).unwrap();
        let thumb = r.thumbnail_path("a.png", "_r", AssetKind::Image);
        assert_eq!(thumb, "_r/images/tn_a.jpg");
        assert_eq!(
            r.original_from_rendition_path(&thumb, "_r", AssetKind::Image)
                .as_deref(),
            Some("a.png")
        );
    }

    #[test]
    fn test_config_validation() {
        let missing = RenditionConfig {
            thumbnail_template: "thumb".to_string(),
            ..RenditionConfig::default()
        };
        assert!(matches!(
            RenditionPathResolver::new(missing),
            Err(AssetLibError::InvalidConfig { .. })
        ));

        let bad_ext = RenditionConfig {
            jpeg_extension: "jpg".to_string(),
            ..RenditionConfig::default()
        };
        assert!(bad_ext.validate().is_err());
        assert!(RenditionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("//a//b/"), "a/b");
        assert_eq!(normalize_path("a/b"), "a/b");
    }
}
