use clap::{App, Arg, SubCommand};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::process;

//===========================================================================//

fn main() {
    env_logger::init();
    let matches = App::new("icontool")
        .version("0.1")
        .about("Builds ICO and ICNS files from a single image")
        .subcommand(
            SubCommand::with_name("create")
                .about("Creates an icon file from a PNG, JPEG or WEBP image")
                .arg(
                    Arg::with_name("format")
                        .takes_value(true)
                        .value_name("FORMAT")
                        .short("f")
                        .long("format")
                        .possible_values(&["ico", "icns"])
                        .default_value("ico")
                        .help("Sets the icon format"),
                )
                .arg(
                    Arg::with_name("filter")
                        .takes_value(true)
                        .value_name("FILTER")
                        .long("filter")
                        .possible_values(&[
                            "lanczos3",
                            "catmull-rom",
                            "triangle",
                        ])
                        .default_value("lanczos3")
                        .help("Sets the resampling filter"),
                )
                .arg(
                    Arg::with_name("output")
                        .takes_value(true)
                        .value_name("PATH")
                        .short("o")
                        .long("output")
                        .help("Sets output path"),
                )
                .arg(
                    Arg::with_name("layers")
                        .takes_value(true)
                        .value_name("DIR")
                        .long("layers")
                        .help("Also saves each size as a PNG in DIR"),
                )
                .arg(Arg::with_name("image").required(true)),
        )
        .subcommand(
            SubCommand::with_name("list")
                .about("Lists the images in an ICO or ICNS file")
                .arg(Arg::with_name("icon").required(true)),
        )
        .get_matches();
    let result = if let Some(submatches) = matches.subcommand_matches("create")
    {
        create(submatches)
    } else if let Some(submatches) = matches.subcommand_matches("list") {
        list(submatches.value_of("icon").unwrap_or_default())
    } else {
        println!("{}", matches.usage());
        Ok(())
    };
    if let Err(error) = result {
        eprintln!("icontool: {}", error);
        process::exit(1);
    }
}

fn create(submatches: &clap::ArgMatches) -> iconpack::Result<()> {
    let format: iconpack::ContainerFormat = submatches
        .value_of("format")
        .unwrap_or("ico")
        .parse()
        .map_err(iconpack::IconError::UnsupportedInput)?;
    let filter = match submatches.value_of("filter") {
        Some("catmull-rom") => iconpack::ResizeFilter::CatmullRom,
        Some("triangle") => iconpack::ResizeFilter::Triangle,
        _ => iconpack::ResizeFilter::Lanczos3,
    };
    let image_path = submatches.value_of("image").unwrap_or_default();
    let out_path = match submatches.value_of("output") {
        Some(path) => PathBuf::from(path),
        None => Path::new(image_path).with_extension(format.extension()),
    };
    let converter = iconpack::Converter::with_options(iconpack::LayerOptions {
        filter,
        ..iconpack::LayerOptions::default()
    });
    let bytes = fs::read(image_path)?;
    let file = converter.convert(image_path, &bytes, format)?;
    fs::write(&out_path, file.data())?;
    println!(
        "Wrote {:?} ({} bytes, {} layers)",
        out_path,
        file.data().len(),
        file.layers().layers().len()
    );
    if let Some(dir) = submatches.value_of("layers") {
        fs::create_dir_all(dir)?;
        for layer in file.layers().layers() {
            fs::write(Path::new(dir).join(layer.file_name()), layer.data())?;
        }
    }
    Ok(())
}

fn list(path: &str) -> iconpack::Result<()> {
    let data = fs::read(path)?;
    if data.starts_with(b"icns") {
        let elements = iconpack::read_icns(data.as_slice())?;
        println!("ICNS file with {} elements", elements.len());
        for (index, element) in elements.iter().enumerate() {
            println!(
                "{:5}: {} ({} bytes)",
                index,
                element.type_code(),
                element.data().len()
            );
        }
    } else {
        let directory = iconpack::IcoDirectory::read(Cursor::new(&data))?;
        println!("ICO file with {} images", directory.entries().len());
        for (index, entry) in directory.entries().iter().enumerate() {
            println!(
                "{:5}: {}x{} {} bpp, {} bytes at offset {}",
                index,
                entry.width(),
                entry.height(),
                entry.bits_per_pixel(),
                entry.data_size(),
                entry.data_offset()
            );
        }
    }
    Ok(())
}

//===========================================================================//
