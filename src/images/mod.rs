//! Avatar and photo loading.
//!
//! Images never influence row height, so loading is entirely off the layout path. The
//! [`ImageLoader`] fetches and decodes on a small worker pool and reports each result as an
//! [`ImageCompletion`] on a channel drained by the UI thread. Failures become `None`, which
//! renderers draw as a placeholder.

pub mod slot;

pub use slot::{ImageBoard, ImageSlot, RowImages, SlotImage};

use crate::model::{ImageLoadError, ResourceId, RowId};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use tracing::{debug, warn};

/// Longest edge of a decoded image. Larger images are downscaled on load.
pub const MAX_DECODED_EDGE: u32 = 64;

/// Number of image worker threads.
pub const DEFAULT_IMAGE_WORKERS: usize = 2;

/// Fetches raw image bytes.
pub trait ImageFetcher {
    /// Fetch the bytes for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageLoadError`] when the image cannot be read.
    fn fetch(&self, id: &ResourceId) -> Result<Vec<u8>, ImageLoadError>;
}

/// Resolves identifiers as paths relative to a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryImageFetcher {
    root: PathBuf,
}

impl DirectoryImageFetcher {
    /// Fetcher rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, id: &ResourceId) -> Option<PathBuf> {
        let relative = Path::new(id.as_str().trim_start_matches('/'));
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        (!escapes).then(|| self.root.join(relative))
    }
}

impl ImageFetcher for DirectoryImageFetcher {
    fn fetch(&self, id: &ResourceId) -> Result<Vec<u8>, ImageLoadError> {
        let path = self
            .resolve(id)
            .filter(|path| path.is_file())
            .ok_or_else(|| ImageLoadError::NotFound(id.clone()))?;
        std::fs::read(&path).map_err(|source| ImageLoadError::Io {
            id: id.clone(),
            source,
        })
    }
}

/// RGBA pixels of a decoded, downscaled image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl DecodedImage {
    /// Decode and downscale encoded image bytes.
    ///
    /// # Errors
    ///
    /// Returns `ImageLoadError::Decode` when the bytes are not a supported image.
    pub fn decode(id: &ResourceId, bytes: &[u8]) -> Result<Self, ImageLoadError> {
        let img = image::load_from_memory(bytes).map_err(|err| ImageLoadError::Decode {
            id: id.clone(),
            reason: err.to_string(),
        })?;
        let img = if img.width() > MAX_DECODED_EDGE || img.height() > MAX_DECODED_EDGE {
            img.thumbnail(MAX_DECODED_EDGE, MAX_DECODED_EDGE)
        } else {
            img
        };
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(width, height, rgba.into_raw()).ok_or_else(|| ImageLoadError::Decode {
            id: id.clone(),
            reason: "image has no pixels".to_string(),
        })
    }

    /// Image from raw RGBA pixels. Returns `None` when the buffer does not match the size.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        (width > 0 && height > 0 && rgba.len() == expected).then_some(Self {
            width,
            height,
            rgba,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel nearest to the fractional position `(fx, fy)`, both in `0.0..=1.0`.
    pub fn sample(&self, fx: f64, fy: f64) -> [u8; 4] {
        let x = ((fx.clamp(0.0, 1.0) * f64::from(self.width)) as u32).min(self.width - 1);
        let y = ((fy.clamp(0.0, 1.0) * f64::from(self.height)) as u32).min(self.height - 1);
        let i = ((y * self.width + x) * 4) as usize;
        let mut px = [0u8; 4];
        if let Some(slice) = self.rgba.get(i..i + 4) {
            px.copy_from_slice(slice);
        }
        px
    }
}

/// Which image of which row a load is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageTarget {
    /// The row's avatar.
    Avatar(RowId),
    /// Photo `index` of the row.
    Photo(RowId, usize),
}

impl ImageTarget {
    /// Row the image belongs to.
    pub fn row(&self) -> RowId {
        match self {
            Self::Avatar(row) | Self::Photo(row, _) => *row,
        }
    }
}

/// Result of one image load.
#[derive(Debug, Clone)]
pub struct ImageCompletion {
    /// Slot the load was requested for.
    pub target: ImageTarget,
    /// Identifier that was loaded.
    pub id: ResourceId,
    /// Decoded image, or `None` when the load failed.
    pub image: Option<Arc<DecodedImage>>,
}

type ImageCache = Arc<RwLock<HashMap<ResourceId, Arc<DecodedImage>>>>;

struct ImageJob {
    target: ImageTarget,
    id: ResourceId,
}

/// Fetches and decodes images on worker threads with a shared decoded-image cache.
pub struct ImageLoader {
    jobs: flume::Sender<ImageJob>,
    cache: ImageCache,
    completions: Sender<ImageCompletion>,
}

impl ImageLoader {
    /// Start `workers` threads (at least one) loading through `fetcher`.
    pub fn new<F>(fetcher: F, workers: usize, completions: Sender<ImageCompletion>) -> Self
    where
        F: ImageFetcher + Send + Sync + 'static,
    {
        let (jobs, job_rx) = flume::unbounded::<ImageJob>();
        let cache: ImageCache = Arc::new(RwLock::new(HashMap::new()));
        let fetcher = Arc::new(fetcher);

        for worker in 0..workers.max(1) {
            let job_rx = job_rx.clone();
            let cache = Arc::clone(&cache);
            let fetcher = Arc::clone(&fetcher);
            let completions = completions.clone();
            let spawned = thread::Builder::new()
                .name(format!("image-loader-{worker}"))
                .spawn(move || {
                    while let Ok(job) = job_rx.recv() {
                        let image = load_one(fetcher.as_ref(), &cache, &job.id);
                        let completion = ImageCompletion {
                            target: job.target,
                            id: job.id,
                            image,
                        };
                        if completions.send(completion).is_err() {
                            break;
                        }
                    }
                });
            if let Err(err) = spawned {
                warn!(error = %err, worker, "Failed to spawn image worker");
            }
        }

        Self {
            jobs,
            cache,
            completions,
        }
    }

    /// Request `id` for `target`. Cached images complete immediately.
    pub fn load(&self, target: ImageTarget, id: ResourceId) {
        if let Some(image) = self.cached(&id) {
            let _ = self.completions.send(ImageCompletion {
                target,
                id,
                image: Some(image),
            });
            return;
        }
        if let Err(flume::SendError(job)) = self.jobs.send(ImageJob { target, id }) {
            warn!(id = %job.id, "Image workers are gone; resolving to placeholder");
            let _ = self.completions.send(ImageCompletion {
                target: job.target,
                id: job.id,
                image: None,
            });
        }
    }

    /// Decoded image for `id`, if already loaded.
    pub fn cached(&self, id: &ResourceId) -> Option<Arc<DecodedImage>> {
        self.cache.read().get(id).cloned()
    }

    /// Number of decoded images held.
    pub fn cached_len(&self) -> usize {
        self.cache.read().len()
    }
}

impl std::fmt::Debug for ImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoader")
            .field("cached", &self.cached_len())
            .finish_non_exhaustive()
    }
}

fn load_one<F: ImageFetcher + ?Sized>(
    fetcher: &F,
    cache: &ImageCache,
    id: &ResourceId,
) -> Option<Arc<DecodedImage>> {
    if let Some(hit) = cache.read().get(id).cloned() {
        return Some(hit);
    }
    let decoded = fetcher
        .fetch(id)
        .and_then(|bytes| DecodedImage::decode(id, &bytes));
    match decoded {
        Ok(image) => {
            // Duplicate loads of the same id may race here; the first insert wins.
            let mut cache = cache.write();
            Some(Arc::clone(
                cache.entry(id.clone()).or_insert_with(|| Arc::new(image)),
            ))
        }
        Err(err) => {
            debug!(id = %id, error = %err, "Image load failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::time::Duration;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 10, 10, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    struct MemoryFetcher {
        calls: AtomicUsize,
    }

    impl ImageFetcher for MemoryFetcher {
        fn fetch(&self, id: &ResourceId) -> Result<Vec<u8>, ImageLoadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match id.as_str() {
                "ok.png" => Ok(png_bytes(4, 2)),
                "big.png" => Ok(png_bytes(256, 128)),
                "garbage" => Ok(b"not an image".to_vec()),
                _ => Err(ImageLoadError::NotFound(id.clone())),
            }
        }
    }

    fn id(s: &str) -> ResourceId {
        ResourceId::new(s).unwrap()
    }

    fn loader() -> (ImageLoader, mpsc::Receiver<ImageCompletion>) {
        let (tx, rx) = mpsc::channel();
        let fetcher = MemoryFetcher {
            calls: AtomicUsize::new(0),
        };
        (ImageLoader::new(fetcher, 2, tx), rx)
    }

    #[test]
    fn loads_and_caches_image() {
        let (loader, rx) = loader();
        let target = ImageTarget::Avatar(RowId::from_raw(1));

        loader.load(target, id("ok.png"));
        let done = rx.recv_timeout(Duration::from_secs(5)).unwrap();

        assert_eq!(done.target, target);
        let image = done.image.unwrap();
        assert_eq!((image.width(), image.height()), (4, 2));
        assert!(loader.cached(&id("ok.png")).is_some());
    }

    #[test]
    fn cached_image_completes_without_worker() {
        let (loader, rx) = loader();
        loader.load(ImageTarget::Avatar(RowId::from_raw(1)), id("ok.png"));
        rx.recv_timeout(Duration::from_secs(5)).unwrap();

        loader.load(ImageTarget::Photo(RowId::from_raw(2), 0), id("ok.png"));
        // Served synchronously from the cache.
        let done = rx.try_recv().unwrap();
        assert_eq!(done.target, ImageTarget::Photo(RowId::from_raw(2), 0));
        assert!(done.image.is_some());
    }

    #[test]
    fn failures_resolve_to_none() {
        let (loader, rx) = loader();
        loader.load(ImageTarget::Avatar(RowId::from_raw(1)), id("missing.png"));
        loader.load(ImageTarget::Avatar(RowId::from_raw(2)), id("garbage"));

        for _ in 0..2 {
            let done = rx.recv_timeout(Duration::from_secs(5)).unwrap();
            assert!(done.image.is_none());
        }
        assert_eq!(loader.cached_len(), 0);
    }

    #[test]
    fn large_images_are_downscaled() {
        let image = DecodedImage::decode(&id("big.png"), &png_bytes(256, 128)).unwrap();
        assert!(image.width() <= MAX_DECODED_EDGE);
        assert!(image.height() <= MAX_DECODED_EDGE);
    }

    #[test]
    fn sample_reads_nearest_pixel() {
        let rgba = vec![
            1, 1, 1, 255, 2, 2, 2, 255, //
            3, 3, 3, 255, 4, 4, 4, 255,
        ];
        let image = DecodedImage::from_rgba(2, 2, rgba).unwrap();
        assert_eq!(image.sample(0.0, 0.0), [1, 1, 1, 255]);
        assert_eq!(image.sample(0.99, 0.0), [2, 2, 2, 255]);
        assert_eq!(image.sample(1.0, 1.0), [4, 4, 4, 255]);
    }

    #[test]
    fn from_rgba_rejects_mismatched_buffer() {
        assert!(DecodedImage::from_rgba(2, 2, vec![0; 3]).is_none());
        assert!(DecodedImage::from_rgba(0, 2, Vec::new()).is_none());
    }

    #[test]
    fn directory_fetcher_rejects_escaping_paths() {
        let fetcher = DirectoryImageFetcher::new(std::env::temp_dir());
        let err = fetcher.fetch(&id("../etc/passwd")).unwrap_err();
        assert!(matches!(err, ImageLoadError::NotFound(_)));
    }

    #[test]
    fn directory_fetcher_reads_relative_files() {
        let dir = std::env::temp_dir().join("reviewlist_image_fetcher");
        std::fs::create_dir_all(dir.join("avatars")).unwrap();
        std::fs::write(dir.join("avatars/a.png"), png_bytes(1, 1)).unwrap();

        let fetcher = DirectoryImageFetcher::new(&dir);
        let bytes = fetcher.fetch(&id("/avatars/a.png")).unwrap();
        let _ = std::fs::remove_dir_all(&dir);

        assert!(!bytes.is_empty());
    }
}
