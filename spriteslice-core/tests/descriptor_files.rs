use std::thread;

use spriteslice_core::descriptor::{self, schema::AssetDescriptor};
use spriteslice_core::image::FixedImageSource;
use spriteslice_core::{ImageAsset, ImageSize};

#[test]
fn descriptor_saved_and_loaded_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hero.sheet.yaml");

    let mut asset = ImageAsset::new();
    asset.set_image_file("hero.png");
    asset.set_explicit_mode(true);
    assert!(asset.add_explicit_cell(0, 0, 32, 32));
    assert!(asset.add_explicit_cell(32, 0, 32, 32));
    assert!(asset.insert_explicit_cell(1, 64, 0, 16, 16));
    descriptor::save_to_path(&AssetDescriptor::from_asset(&asset), &path).unwrap();

    let mut loaded = descriptor::load_from_path(&path).unwrap().into_asset().unwrap();
    loaded
        .load_image(&FixedImageSource(ImageSize::new(128, 64)), Some(dir.path()))
        .unwrap();
    assert_eq!(loaded.frame_count(), 3);
    assert_eq!(loaded.frame_area(1).pixel().offset_x(), 64);
    assert_eq!(loaded.write_explicit_cells(), asset.write_explicit_cells());
}

#[test]
fn missing_descriptor_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = descriptor::load_from_path(dir.path().join("absent.yaml")).unwrap_err();
    assert!(format!("{:#}", err).contains("absent.yaml"));
}

#[test]
fn readers_on_other_threads_see_whole_tables() {
    let mut asset = ImageAsset::new();
    asset.bind_image(ImageSize::new(64, 64));
    asset.set_cell_width(8);
    asset.set_cell_height(8);
    asset.set_cell_stride_x(8);
    asset.set_cell_stride_y(8);
    let reader = asset.reader();

    let handle = thread::spawn(move || {
        for _ in 0..200 {
            let table = reader.snapshot();
            let first = *table.by_index(0).pixel();
            assert!(!table.is_empty());
            assert!(table
                .iter()
                .all(|f| f.pixel().width == first.width && f.pixel().height == first.height));
        }
    });

    for i in 0..200 {
        let size = if i % 2 == 0 { 16 } else { 8 };
        asset.set_cell_width(size);
        asset.set_cell_height(size);
        asset.set_cell_stride_x(size);
        asset.set_cell_stride_y(size);
    }
    handle.join().unwrap();
}
