#![cfg(feature = "cli")]

use std::error::Error as _;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::arg;
use route53_cloudformation::{
    CollisionPolicy, ExportOptions, Exporter,
    client::{Route53Client, Route53Configuration},
    export::write_template,
};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match export() {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

fn export() -> Result<(), ()> {
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let app = clap::Command::new("route53-to-cloudformation")
        .about("Output a Route53 Hosted Zone as a CloudFormation YAML template")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(arg!(<HOSTED_ZONE_ID> "The ID of the Route53 Hosted Zone to export"))
        .arg(arg!(--region <REGION> "AWS region to use for the Route53 client"))
        .arg(arg!(--profile <PROFILE> "AWS shared config profile to use"))
        .arg(
            arg!(--"on-collision" <POLICY> "What to do when two record sets map to the same resource name (overwrite, error, suffix)")
                .value_parser(clap::value_parser!(CollisionPolicy))
                .default_value("overwrite"),
        )
        .arg(arg!(--description <TEXT> "Template description, instead of 'DNS for <domain>'"))
        .arg(
            arg!(-o --output <PATH> "Write the template to a file instead of standard output")
                .value_parser(clap::value_parser!(Utf8PathBuf)),
        );

    let args = app.get_matches();
    let zone_id: &String = args
        .get_one("HOSTED_ZONE_ID")
        .expect("HOSTED_ZONE_ID is required");

    let client = Route53Configuration {
        region: args.get_one::<String>("region").cloned(),
        profile: args.get_one::<String>("profile").cloned(),
    };
    let options = ExportOptions {
        collisions: *args
            .get_one::<CollisionPolicy>("on-collision")
            .expect("on-collision has a default"),
        description: args.get_one::<String>("description").cloned(),
    };
    let output = args.get_one::<Utf8PathBuf>("output");

    match export_zone(zone_id, &client, options) {
        Ok(rendered) => {
            if let Err(error) = write_template(output.map(|path| path.as_path()), &rendered) {
                eprintln!("Error writing template:");
                eprintln!("{error}");
                return Err(());
            }
        }
        Err(error) => {
            eprintln!("Error exporting hosted zone {zone_id}:");
            eprintln!("{error}");
            let mut source = error.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            return Err(());
        }
    }

    Ok(())
}

fn export_zone(
    zone_id: &str,
    client: &Route53Configuration,
    options: ExportOptions,
) -> Result<String, Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(async {
        let client = Route53Client::from_config(client).await;
        let exporter = Exporter::new(client, options);
        Ok(exporter.render(zone_id).await?)
    })
}
