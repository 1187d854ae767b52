//! Texture catalog keyed by name. Sprites come from PNG files when present,
//! otherwise from built-in glyph art. A sprite's size doubles as the body
//! size of the entities drawn with it.

use image::RgbaImage;
use ratatui::style::Color;
use std::collections::HashMap;
use std::path::Path;

use crate::entities::{ENEMY_TEXTURE, LASER_TEXTURE, PLAYER_TEXTURE};

/// Pixels with alpha below this are treated as transparent
const ALPHA_CUTOFF: u8 = 128;

#[derive(Debug, Clone, PartialEq)]
pub enum SpriteArt {
    /// Text art drawn as-is in a single colour
    Glyphs {
        lines: Vec<&'static str>,
        color: Color,
    },
    /// Decoded RGBA pixels, resampled to the terminal cell grid when drawn
    Pixels {
        width: u32,
        height: u32,
        pixels: Vec<[u8; 4]>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Body size in world units
    pub width: f32,
    pub height: f32,
    pub art: SpriteArt,
}

impl Sprite {
    pub fn glyphs(width: f32, height: f32, lines: Vec<&'static str>, color: Color) -> Self {
        Self {
            width,
            height,
            art: SpriteArt::Glyphs { lines, color },
        }
    }

    pub fn from_image(image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        let pixels = image.pixels().map(|p| p.0).collect();
        Self {
            width: width as f32,
            height: height as f32,
            art: SpriteArt::Pixels {
                width,
                height,
                pixels,
            },
        }
    }

    /// Nearest-neighbour sample at normalised `(u, v)` in `[0, 1)`.
    /// Returns `None` for transparent pixels and for glyph sprites.
    pub fn sample(&self, u: f32, v: f32) -> Option<Color> {
        let SpriteArt::Pixels {
            width,
            height,
            pixels,
        } = &self.art
        else {
            return None;
        };
        if *width == 0 || *height == 0 {
            return None;
        }

        let px = ((u.clamp(0.0, 1.0) * *width as f32) as u32).min(width - 1);
        let py = ((v.clamp(0.0, 1.0) * *height as f32) as u32).min(height - 1);
        let [r, g, b, a] = pixels[(py * width + px) as usize];
        (a >= ALPHA_CUTOFF).then_some(Color::Rgb(r, g, b))
    }
}

/// Built-in art used when a texture file is missing or unreadable
pub fn builtin_sprite(key: &str) -> Sprite {
    match key {
        PLAYER_TEXTURE => Sprite::glyphs(60.0, 40.0, vec![" /^\\ ", "<|||>"], Color::Red),
        LASER_TEXTURE => Sprite::glyphs(8.0, 24.0, vec!["|"], Color::LightRed),
        ENEMY_TEXTURE => Sprite::glyphs(70.0, 40.0, vec!["\\|/", "{===}"], Color::Blue),
        _ => Sprite::glyphs(10.0, 10.0, vec!["?"], Color::Magenta),
    }
}

#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    sprites: HashMap<&'static str, Sprite>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the built-in art for every game texture
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for key in [PLAYER_TEXTURE, LASER_TEXTURE, ENEMY_TEXTURE] {
            catalog.insert(key, builtin_sprite(key));
        }
        catalog
    }

    pub fn insert(&mut self, key: &'static str, sprite: Sprite) {
        self.sprites.insert(key, sprite);
    }

    /// Loads `path` under `key`, falling back to the built-in art.
    /// Returns `true` if the image file was used.
    pub fn load_image(&mut self, key: &'static str, path: &Path) -> bool {
        if !path.exists() {
            tracing::debug!(key, path = %path.display(), "texture file missing, using built-in art");
            self.insert(key, builtin_sprite(key));
            return false;
        }

        match image::open(path) {
            Ok(img) => {
                let sprite = Sprite::from_image(&img.to_rgba8());
                tracing::info!(key, width = sprite.width, height = sprite.height, "loaded texture");
                self.insert(key, sprite);
                true
            }
            Err(err) => {
                tracing::warn!(key, path = %path.display(), %err, "failed to decode texture, using built-in art");
                self.insert(key, builtin_sprite(key));
                false
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Sprite> {
        self.sprites.get(key)
    }

    /// Body size for entities drawn with `key`
    pub fn size_of(&self, key: &str) -> (f32, f32) {
        match self.get(key) {
            Some(sprite) => (sprite.width, sprite.height),
            None => {
                let sprite = builtin_sprite(key);
                (sprite.width, sprite.height)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_builtin_catalog_has_game_textures() {
        let catalog = AssetCatalog::builtin();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.get("red").is_some());
        assert!(catalog.get("redLaser").is_some());
        assert!(catalog.get("blue").is_some());
        assert_eq!(catalog.size_of("blue"), (70.0, 40.0));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let mut catalog = AssetCatalog::new();
        let used = catalog.load_image("red", Path::new("does/not/exist.png"));
        assert!(!used);
        assert_eq!(catalog.get("red"), Some(&builtin_sprite("red")));
    }

    #[test]
    fn test_unknown_key_size() {
        let catalog = AssetCatalog::new();
        assert_eq!(catalog.size_of("nothing"), (10.0, 10.0));
    }

    #[test]
    fn test_sprite_from_image_size_and_sampling() {
        let mut img = RgbaImage::new(4, 2);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(3, 1, Rgba([0, 0, 255, 255]));
        // Remaining pixels are transparent black

        let sprite = Sprite::from_image(&img);
        assert_eq!((sprite.width, sprite.height), (4.0, 2.0));
        assert_eq!(sprite.sample(0.0, 0.0), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(sprite.sample(0.99, 0.99), Some(Color::Rgb(0, 0, 255)));
        assert_eq!(sprite.sample(1.0, 1.0), Some(Color::Rgb(0, 0, 255)));
        assert_eq!(sprite.sample(0.5, 0.0), None);
    }

    #[test]
    fn test_glyph_sprite_has_no_pixels() {
        assert_eq!(builtin_sprite("red").sample(0.5, 0.5), None);
    }
}
