use asset_resizer::services::resize_batch;
use asset_resizer::{
    AppState, DirectoryService, FileError, Preview, PreviewService, ResizeMode, ResizeService,
    ValidationError,
};
use image::{ImageFormat, ImageReader};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn sniff(path: &Path) -> (Option<ImageFormat>, u32, u32) {
    let reader = ImageReader::open(path)
        .unwrap()
        .with_guessed_format()
        .unwrap();
    let format = reader.format();
    let image = reader.decode().unwrap();
    (format, image.width(), image.height())
}

#[test]
fn overwrite_batch_resizes_valid_entries_and_reports_the_rest() {
    let dir = tempdir().unwrap();
    image::RgbImage::from_pixel(10, 10, image::Rgb([200, 10, 10]))
        .save(dir.path().join("a.png"))
        .unwrap();
    fs::write(dir.path().join("b.png"), "just some text in disguise").unwrap();

    let report = resize_batch(
        Some(dir.path()),
        names(&["a.png", "b.png"]),
        "5",
        "5",
        ResizeMode::Overwrite,
    )
    .unwrap();

    assert!(!report.is_success());
    assert_eq!(report.resized, names(&["a.png"]));
    assert_eq!(report.failed_names(), vec!["b.png"]);
    assert!(matches!(report.failures[0].reason, FileError::NotAnImage(_)));
    assert_eq!(
        sniff(&dir.path().join("a.png")),
        (Some(ImageFormat::Png), 5, 5)
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("b.png")).unwrap(),
        "just some text in disguise"
    );
}

#[test]
fn save_as_keeps_the_original_format() {
    let dir = tempdir().unwrap();
    image::RgbImage::from_pixel(40, 30, image::Rgb([0, 128, 255]))
        .save(dir.path().join("photo.jpg"))
        .unwrap();
    let before = fs::read(dir.path().join("photo.jpg")).unwrap();
    let out = dir.path().join("out.png");

    let report = resize_batch(
        Some(dir.path()),
        names(&["photo.jpg"]),
        "100",
        "50",
        ResizeMode::SaveAs(out.clone()),
    )
    .unwrap();

    assert!(report.is_success());
    assert_eq!(sniff(&out), (Some(ImageFormat::Jpeg), 100, 50));
    assert_eq!(fs::read(dir.path().join("photo.jpg")).unwrap(), before);
}

#[test]
fn every_listed_format_round_trips_at_the_requested_size() {
    let dir = tempdir().unwrap();
    let rgb = image::RgbImage::from_pixel(9, 7, image::Rgb([1, 2, 3]));
    let rgba = image::RgbaImage::from_pixel(9, 7, image::Rgba([1, 2, 3, 128]));
    rgba.save(dir.path().join("a.png")).unwrap();
    rgb.save(dir.path().join("b.jpeg")).unwrap();
    rgb.save(dir.path().join("c.bmp")).unwrap();
    rgba.save(dir.path().join("d.gif")).unwrap();

    let selection = names(&["a.png", "b.jpeg", "c.bmp", "d.gif"]);
    let report = resize_batch(
        Some(dir.path()),
        selection.clone(),
        "4",
        "3",
        ResizeMode::Overwrite,
    )
    .unwrap();

    assert!(report.is_success(), "{report}");
    let expected = [
        ImageFormat::Png,
        ImageFormat::Jpeg,
        ImageFormat::Bmp,
        ImageFormat::Gif,
    ];
    for (name, format) in selection.iter().zip(expected) {
        assert_eq!(sniff(&dir.path().join(name)), (Some(format), 4, 3), "{name}");
    }
}

#[test]
fn file_deleted_after_listing_fails_only_itself() {
    let dir = tempdir().unwrap();
    image::RgbImage::new(6, 6)
        .save(dir.path().join("keep.png"))
        .unwrap();
    image::RgbImage::new(6, 6)
        .save(dir.path().join("gone.png"))
        .unwrap();

    let state = AppState::new();
    let directories = DirectoryService::new(state.workspace.clone());
    assert_eq!(directories.open(dir.path().to_path_buf()).len(), 2);
    fs::remove_file(dir.path().join("gone.png")).unwrap();

    let resizer = ResizeService::new(state.workspace.clone());
    let job = resizer
        .prepare(names(&["gone.png", "keep.png"]), "2", "2", ResizeMode::Overwrite)
        .unwrap();
    let report = resizer.run(job).unwrap();

    assert_eq!(report.resized, names(&["keep.png"]));
    assert!(matches!(report.failures[0].reason, FileError::Io(_)));
    assert!(!dir.path().join("gone.png").exists());
}

#[test]
fn validation_errors_perform_no_io() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.png");
    image::RgbImage::new(10, 10).save(&a).unwrap();
    let before = fs::read(&a).unwrap();
    let out = dir.path().join("out.png");

    let cases = [
        (names(&["a.png"]), "0", "5", ResizeMode::Overwrite),
        (names(&["a.png"]), "-2", "5", ResizeMode::Overwrite),
        (names(&["a.png"]), "5", "five", ResizeMode::Overwrite),
        (names(&["a.png"]), "0", "5", ResizeMode::SaveAs(out.clone())),
        (names(&["a.png"]), "5", "", ResizeMode::SaveAs(out.clone())),
        (names(&["a.png", "a.png"]), "5", "5", ResizeMode::SaveAs(out.clone())),
        (vec![], "5", "5", ResizeMode::SaveAs(out.clone())),
    ];
    for (selection, w, h, mode) in cases {
        assert!(resize_batch(Some(dir.path()), selection, w, h, mode).is_err());
    }

    assert_eq!(fs::read(&a).unwrap(), before);
    assert!(!out.exists());
}

#[test]
fn save_as_with_two_entries_is_a_selection_error() {
    let dir = tempdir().unwrap();
    let err = resize_batch(
        Some(dir.path()),
        names(&["a.png", "b.png"]),
        "abc",
        "5",
        ResizeMode::SaveAs(dir.path().join("out.png")),
    )
    .unwrap_err();
    assert_eq!(err, ValidationError::SaveAsSelection { count: 2 });
}

#[test]
fn directory_listing_and_preview_follow_the_open_directory() {
    let dir = tempdir().unwrap();
    image::RgbImage::new(3, 2)
        .save(dir.path().join("Shot.PNG"))
        .unwrap();
    fs::write(dir.path().join("notes.txt"), "x").unwrap();

    let state = AppState::new();
    let directories = DirectoryService::new(state.workspace.clone());
    let previews = PreviewService::new(state.workspace.clone());

    let entries = directories.open(dir.path().to_path_buf());
    let listed: Vec<&str> = entries.iter().map(|e| e.name()).collect();
    assert_eq!(listed, vec!["Shot.PNG"]);
    assert_eq!(previews.preview(Some("Shot.PNG")).dimensions(), Some((3, 2)));

    let empty = tempdir().unwrap();
    assert!(directories.open(empty.path().to_path_buf()).is_empty());
    assert_eq!(previews.preview(Some("Shot.PNG")), Preview::ReadError);
    assert!(directories.open(empty.path().join("nope")).is_empty());
}
