extern crate iconpack;

use image::{GenericImageView, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

//===========================================================================//

fn red_square_png(size: u32) -> Vec<u8> {
    let image = RgbaImage::from_pixel(size, size, Rgba([255, 0, 0, 255]));
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
    bytes
}

fn translucent_source() -> iconpack::SourceImage {
    let mut rgba = Vec::<u8>::new();
    for index in 0..(40 * 25) {
        let alpha = if index % 3 == 0 { 0 } else { 200 };
        rgba.extend_from_slice(&[(index % 256) as u8, 90, 30, alpha]);
    }
    iconpack::SourceImage::from_rgba(40, 25, rgba).unwrap()
}

//===========================================================================//

#[test]
fn every_format_gets_every_size() {
    let source = translucent_source();
    let formats = &[
        iconpack::ContainerFormat::WindowsIcon,
        iconpack::ContainerFormat::MacIcon,
    ];
    for &format in formats.iter() {
        let set = iconpack::build_layers(&source, format).unwrap();
        assert_eq!(set.layers().len(), format.sizes().len());
        for (layer, &size) in set.layers().iter().zip(format.sizes()) {
            assert_eq!(layer.size(), size);
            let decoded = image::load_from_memory(layer.data()).unwrap();
            assert_eq!(decoded.dimensions(), (size, size));
        }
    }
}

#[test]
fn red_square_to_icns() {
    let png = red_square_png(512);
    let source = iconpack::SourceImage::from_bytes(&png).unwrap();
    let set =
        iconpack::build_layers(&source, iconpack::ContainerFormat::MacIcon)
            .unwrap();
    let sizes: Vec<u32> =
        set.layers().iter().map(|layer| layer.size()).collect();
    assert_eq!(sizes, vec![1024, 512, 256, 128, 64, 32, 16]);
    let icns = set.encode().unwrap();
    assert_eq!(&icns[0..4], b"\x69\x63\x6e\x73");
    let total = u32::from_be_bytes([icns[4], icns[5], icns[6], icns[7]]);
    assert_eq!(total as usize, icns.len());
    let elements = iconpack::read_icns(icns.as_slice()).unwrap();
    let ic10 = elements
        .iter()
        .find(|element| element.type_code().to_string() == "ic10")
        .unwrap();
    assert_eq!(ic10.data().len(), set.layer(1024).unwrap().data().len());
    assert_eq!(elements.len(), 11);
}

#[test]
fn windows_icon_header() {
    let source = translucent_source();
    let set =
        iconpack::build_layers(&source, iconpack::ContainerFormat::WindowsIcon)
            .unwrap();
    let ico = iconpack::encode_ico(set.layers()).unwrap();
    let expected: &[u8] = b"\x00\x00\x01\x00\x0e\x00";
    assert_eq!(&ico[0..6], expected);
    let directory = iconpack::IcoDirectory::read(Cursor::new(&ico)).unwrap();
    let last = directory.entries().last().unwrap();
    assert_eq!(
        last.data_offset() as usize + last.data_size() as usize,
        ico.len()
    );
}

#[test]
fn width_and_height_sentinel() {
    let layers = vec![
        iconpack::IconLayer::from_png_data(256, vec![0xaa; 3]),
        iconpack::IconLayer::from_png_data(16, vec![0xbb; 5]),
    ];
    let ico = iconpack::encode_ico(&layers).unwrap();
    // First directory entry starts at byte 6, the second at byte 22.
    assert_eq!(&ico[6..8], &[0x00, 0x00]);
    assert_eq!(&ico[22..24], &[0x10, 0x10]);
}

#[test]
fn retina_expansion_for_512() {
    let source = translucent_source();
    let layer =
        iconpack::resize(&source, 512, iconpack::ResizeFilter::Lanczos3)
            .unwrap();
    let icns = iconpack::encode_icns(&[layer.clone()]).unwrap();
    let elements = iconpack::read_icns(icns.as_slice()).unwrap();
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0].type_code().to_string(), "ic09");
    assert_eq!(elements[1].type_code().to_string(), "ic14");
    assert_eq!(elements[0].data(), layer.data());
    assert_eq!(elements[0].data(), elements[1].data());
}

#[test]
fn encoding_is_deterministic() {
    let source = translucent_source();
    let formats = &[
        iconpack::ContainerFormat::WindowsIcon,
        iconpack::ContainerFormat::MacIcon,
    ];
    for &format in formats.iter() {
        let set = iconpack::build_layers(&source, format).unwrap();
        assert_eq!(set.encode().unwrap(), set.encode().unwrap());
        let rebuilt = iconpack::build_layers(&source, format).unwrap();
        assert_eq!(set.encode().unwrap(), rebuilt.encode().unwrap());
    }
}

#[test]
fn converter_produces_named_file() {
    let converter = iconpack::Converter::new();
    let file = converter
        .convert(
            "upload-1",
            &red_square_png(64),
            iconpack::ContainerFormat::WindowsIcon,
        )
        .unwrap();
    assert_eq!(file.file_name(), "icon.ico");
    assert_eq!(file.extension(), "ico");
    assert_eq!(file.mime_type(), "image/x-icon");
    assert_eq!(file.data(), file.layers().encode().unwrap().as_slice());
    assert!(!converter.is_in_flight("upload-1"));
}

//===========================================================================//
