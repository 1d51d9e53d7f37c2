use anyhow::Context;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

pub const PROFILE_PICTURE_DIR: &str = "profile_pictures";

/// Stored name for an upload: a UUID prefix plus the sanitized original name
pub fn stored_file_name(original_name: &str) -> String {
    let cleaned = sanitize_filename::sanitize(original_name.trim());
    let cleaned = if cleaned.is_empty() {
        "picture".to_string()
    } else {
        cleaned
    };
    format!("{}_{}", Uuid::new_v4(), cleaned)
}

/// Writes the picture under `media_root` and returns its path relative to it.
pub async fn save_profile_picture(
    media_root: &Path,
    original_name: &str,
    data: &[u8],
) -> anyhow::Result<String> {
    let dir = media_root.join(PROFILE_PICTURE_DIR);
    fs::create_dir_all(&dir)
        .await
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let file_name = stored_file_name(original_name);
    let path = dir.join(&file_name);

    let mut file = fs::File::create(&path)
        .await
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(data).await?;
    file.flush().await?;

    Ok(format!("{}/{}", PROFILE_PICTURE_DIR, file_name))
}

fn resolve(media_root: &Path, relative: &str) -> Option<PathBuf> {
    let relative = Path::new(relative);
    // Stored paths never leave the media root
    if relative.is_absolute()
        || relative
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
    {
        return None;
    }
    Some(media_root.join(relative))
}

/// Removes a stored file if it is still on disk.
pub async fn remove_media_file(media_root: &Path, relative: &str) -> anyhow::Result<()> {
    let Some(path) = resolve(media_root, relative) else {
        tracing::warn!("Refusing to remove media path outside root: {}", relative);
        return Ok(());
    };

    match fs::remove_file(&path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_name_is_sanitized_and_prefixed() {
        let name = stored_file_name("../../etc/pass wd?.png");
        assert!(!name.contains('/'));
        assert!(!name.contains('?'));
        assert!(name.ends_with(".png"));
        assert!(Uuid::parse_str(&name[..36]).is_ok());
    }

    #[tokio::test]
    async fn save_then_remove_picture() {
        let root = tempfile::tempdir().unwrap();

        let relative = save_profile_picture(root.path(), "me.jpg", b"jpeg-bytes")
            .await
            .unwrap();
        let stored = root.path().join(&relative);

        assert!(relative.starts_with("profile_pictures/"));
        assert_eq!(std::fs::read(&stored).unwrap(), b"jpeg-bytes");

        remove_media_file(root.path(), &relative).await.unwrap();
        assert!(!stored.exists());

        // Already gone is not an error
        remove_media_file(root.path(), &relative).await.unwrap();
    }

    #[tokio::test]
    async fn remove_ignores_paths_outside_root() {
        let root = tempfile::tempdir().unwrap();
        remove_media_file(root.path(), "../outside.jpg").await.unwrap();
    }
}
