use argh::FromArgs;
use std::path::PathBuf;

use strata::{
    comm::LocalGroup,
    image::Image,
    imgproc::{
        color::Quantization,
        morphology::{KernelShape, StructuringElement},
    },
    io::functional::{self as F, GenericImage},
    pipeline::{LogViewer, Participant, PipelineConfig},
};

#[derive(FromArgs)]
/// Convert an image to YCbCr, dilate one channel across a group of participants and convert it back
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// path to the output image (default: out.jpg)
    #[argh(option, short = 'o', default = "PathBuf::from(\"out.jpg\")")]
    output: PathBuf,

    /// number of participants (default: 4)
    #[argh(option, short = 'n', default = "4")]
    participants: usize,

    /// structuring element: star5, full11, box<N>, cross<N>, diamond<N> or ellipse<N>
    /// (default: star5)
    #[argh(option, short = 'k', default = "String::from(\"star5\")")]
    kernel: String,

    /// converted channel to dilate, 0 is luma (default: 0)
    #[argh(option, short = 'c', default = "0")]
    channel: usize,

    /// truncate instead of rounding when narrowing to 8 bits
    #[argh(switch)]
    truncate: bool,
}

fn parse_kernel(name: &str) -> Result<StructuringElement, Box<dyn std::error::Error>> {
    let split = name
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(name.len());
    let (shape, size) = name.split_at(split);
    let size: usize = if size.is_empty() { 5 } else { size.parse()? };

    let kernel = match shape {
        "star" if size == 5 => StructuringElement::star5x5(),
        "full" | "box" => StructuringElement::full(size)?,
        "cross" => StructuringElement::from_shape(KernelShape::Cross { size })?,
        "star" | "diamond" => StructuringElement::from_shape(KernelShape::Diamond { size })?,
        "ellipse" => StructuringElement::from_shape(KernelShape::Ellipse {
            width: size,
            height: size,
        })?,
        _ => return Err(format!("unknown structuring element: {name}").into()),
    };

    Ok(kernel)
}

fn run<const C: usize>(
    group: &LocalGroup,
    image: Image<u8, C>,
    config: &PipelineConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let results = group.run(|comm| {
        let participant = Participant::new(comm, config);
        let source = participant.is_coordinator().then(|| image.clone());
        participant.run(source, &LogViewer)
    });

    for result in results {
        result?;
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let quantization = if args.truncate {
        Quantization::Truncate
    } else {
        Quantization::NearestEven
    };
    let config = PipelineConfig::default()
        .with_kernel(parse_kernel(&args.kernel)?)
        .with_channel(args.channel)
        .with_quantization(quantization)
        .with_output(args.output);

    // read the image before the group starts so a bad path cannot stall it
    let image = F::read_image_any(&args.image_path)?;
    log::info!(
        "read {} ({}, {} channels)",
        args.image_path.display(),
        image.size(),
        image.num_channels()
    );

    let group = LocalGroup::new(args.participants)?;

    match image {
        GenericImage::L8(img) => run(&group, img, &config),
        GenericImage::La8(img) => run(&group, img, &config),
        GenericImage::Rgb8(img) => run(&group, img, &config),
        GenericImage::Rgba8(img) => run(&group, img, &config),
    }
}
