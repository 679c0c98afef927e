use chaoshosts_common::catalog::Catalog;
use chaoshosts_common::config::Config;
use chaoshosts_common::host::HostInfo;
use chaoshosts_common::zone::RecordData;
use chaoshosts_core::format::Style;
use chaoshosts_core::service::HostTableService;
use chrono::NaiveDate;

use crate::fixtures::{FakeDirectory, LogCapture, cname, hinfo, name, ptr, zone};

fn generated() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
}

fn address_zone() -> chaoshosts_common::zone::Zone {
    zone(
        "CH-ADDR.NET.",
        100,
        vec![
            ("CH-ADDR.NET.", RecordData::Soa { serial: 100 }),
            ("400.CH-ADDR.NET.", ptr("MIT-NET.")),
            ("7000.CH-ADDR.NET.", ptr("UU-NET.")),
            ("101.CH-ADDR.NET.", ptr("FOO.CHAOSNET.NET.")),
            ("102.CH-ADDR.NET.", ptr("FOO.CHAOSNET.NET.")),
            ("7001.CH-ADDR.NET.", ptr("CADR.MIT.EDU.")),
            ("7002.CH-ADDR.NET.", ptr("NOCPU.CHAOSNET.NET.")),
        ],
    )
}

fn chaosnet_zone() -> chaoshosts_common::zone::Zone {
    zone(
        "CHAOSNET.NET.",
        7,
        vec![
            ("CHAOSNET.NET.", RecordData::Soa { serial: 7 }),
            ("F.CHAOSNET.NET.", cname("FOO.CHAOSNET.NET.")),
        ],
    )
}

fn mit_zone() -> chaoshosts_common::zone::Zone {
    zone(
        "MIT.EDU.",
        3,
        vec![("LM.MIT.EDU.", cname("cadr.mit.edu."))],
    )
}

fn directory() -> FakeDirectory {
    FakeDirectory::default()
        .with_zone(address_zone())
        .with_zone(chaosnet_zone())
        .with_zone(mit_zone())
        .with_host("FOO.CHAOSNET.NET.", hinfo("ITS", "PDP10", &[0o101, 0o102]))
        .with_host("CADR.MIT.EDU.", hinfo("LISPM", "CADR", &[0o7001]))
        .with_host(
            "NOCPU.CHAOSNET.NET.",
            HostInfo {
                addresses: vec![0o7002],
                os: Some("ITS".into()),
                ..Default::default()
            },
        )
}

async fn render(directory: &FakeDirectory, cfg: &Config, style: Style) -> String {
    let service: HostTableService = HostTableService::new(directory, cfg);
    let catalog: Catalog = service.load_catalog().await.unwrap();
    let mut out: Vec<u8> = Vec::new();
    service
        .render(&catalog, style, generated(), &mut out)
        .await
        .unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn load_catalog_should_assemble_every_table() {
    let directory: FakeDirectory = directory();
    let cfg: Config = Config::default();
    let catalog: Catalog = HostTableService::new(&directory, &cfg)
        .load_catalog()
        .await
        .unwrap();

    assert_eq!(catalog.address_serial, 100);
    assert_eq!(catalog.hosts.len(), 3);
    assert_eq!(catalog.networks.get(&1), Some(&name("MIT-NET.")));
    assert_eq!(catalog.networks.get(&0o70), Some(&name("UU-NET.")));
    assert_eq!(
        catalog.aliases_of(&name("CADR.MIT.EDU.")),
        &[name("LM.MIT.EDU.")]
    );
    assert_eq!(catalog.serials.len(), 2);
}

#[tokio::test]
async fn h3text_should_render_pruned_its_hosts() {
    let cfg: Config = Config {
        prune_legacy_root: true,
        ..Default::default()
    };
    let output: String = render(&directory(), &cfg, Style::H3Text).await;

    let expected: &str = "\
;;; Generated on 2024-01-02 based on CH-ADDR.NET serial 100
;; and on serial 7 of CHAOSNET.NET.
;; and on serial 3 of MIT.EDU.

;;; Definition of Chaosnet for HOSTS3 UNTERNET scheme.
;;; This is not a value you can change, it's wired into the ITS monitor.
NET : UN 7.0.0.0 : CHAOS :

HOST : CHAOS 7001 : CADR.MIT.EDU, LM.MIT.EDU : CADR : LISPM : :
HOST : CHAOS 101, CHAOS 102 : FOO, F : PDP10 : ITS : :
";
    assert_eq!(output, expected);
}

#[tokio::test]
async fn lispm_should_render_decimal_networks_and_local_names() {
    let cfg: Config = Config {
        local_domain: Some(name("MIT.EDU.")),
        ..Default::default()
    };
    let output: String = render(&directory(), &cfg, Style::Lispm).await;
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(
        &lines[4..],
        &[
            "NET 1, MIT-NET",
            "NET 56, UU-NET",
            "",
            "HOST CADR, CHAOS 7001, USER, LISPM, CADR, [LM]",
            "HOST FOO.CHAOSNET.NET, [CHAOS 101, CHAOS 102], USER, ITS, PDP10, [F.CHAOSNET.NET]",
        ]
    );
}

#[tokio::test]
async fn incomplete_hinfo_should_only_drop_that_host() {
    let output: String = render(&directory(), &Config::default(), Style::H3Text).await;
    assert!(!output.contains("NOCPU"));
    assert_eq!(output.lines().filter(|l| l.starts_with("HOST")).count(), 2);
}

#[tokio::test]
async fn incomplete_hinfo_should_log_one_line_naming_the_host() {
    let logs: LogCapture = LogCapture::default();
    let _guard = logs.install();
    render(&directory(), &Config::default(), Style::H3Text).await;

    let lines: Vec<String> = logs.lines();
    assert_eq!(lines.len(), 1, "{lines:?}");
    assert!(lines[0].contains("WARN"));
    assert!(lines[0].contains("Skipping NOCPU.CHAOSNET.NET.: HINFO is missing CPU"));
}

#[tokio::test]
async fn failed_host_query_should_skip_host() {
    let directory: FakeDirectory = FakeDirectory::default()
        .with_zone(address_zone())
        .with_zone(chaosnet_zone())
        .with_zone(mit_zone())
        .with_host("CADR.MIT.EDU.", hinfo("LISPM", "CADR", &[0o7001]));
    let output: String = render(&directory, &Config::default(), Style::Lispm).await;

    let hosts: Vec<&str> = output.lines().filter(|l| l.starts_with("HOST")).collect();
    assert_eq!(
        hosts,
        vec!["HOST CADR.MIT.EDU, CHAOS 7001, USER, LISPM, CADR, [LM.MIT.EDU]"]
    );
}

#[tokio::test]
async fn longer_live_answer_should_win() {
    let directory: FakeDirectory = directory().with_host(
        "FOO.CHAOSNET.NET.",
        hinfo("ITS", "PDP10", &[0o101, 0o102, 0o103]),
    );
    let output: String = render(&directory, &Config::default(), Style::H3Text).await;
    assert!(output.contains(
        "HOST : CHAOS 101, CHAOS 102, CHAOS 103 : FOO.CHAOSNET.NET, F.CHAOSNET.NET :"
    ));
}

#[tokio::test]
async fn shortnames_should_list_its_hosts_only() {
    let cfg: Config = Config {
        prune_legacy_root: true,
        ..Default::default()
    };
    let output: String = render(&directory(), &cfg, Style::Shortnames).await;
    assert_eq!(output, "F\n");
}

#[tokio::test]
async fn shortnames_should_log_error_for_legacy_host_without_aliases() {
    let cfg: Config = Config {
        prune_legacy_root: true,
        ..Default::default()
    };
    let logs: LogCapture = LogCapture::default();
    let _guard = logs.install();
    let output: String = render(&directory(), &cfg, Style::Shortnames).await;

    assert_eq!(output, "F\n");
    let lines: Vec<String> = logs.lines();
    assert_eq!(lines.len(), 1, "{lines:?}");
    assert!(lines[0].contains("ERROR"));
    assert!(lines[0].contains("No aliases recorded for NOCPU.CHAOSNET.NET."));
}

#[tokio::test]
async fn shortnames_without_its_hosts_should_print_empty_line() {
    let directory: FakeDirectory = FakeDirectory::default()
        .with_zone(zone(
            "CH-ADDR.NET.",
            1,
            vec![("7001.CH-ADDR.NET.", ptr("CADR.MIT.EDU."))],
        ))
        .with_zone(mit_zone())
        .with_host("CADR.MIT.EDU.", hinfo("LISPM", "CADR", &[0o7001]));
    let output: String = render(&directory, &Config::default(), Style::Shortnames).await;
    assert_eq!(output, "\n");
}

#[tokio::test]
async fn failed_alias_zone_transfer_should_be_fatal() {
    let directory: FakeDirectory = FakeDirectory::default()
        .with_zone(address_zone())
        .with_zone(chaosnet_zone());
    let cfg: Config = Config::default();
    let err = HostTableService::new(&directory, &cfg)
        .load_catalog()
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "zone transfer of MIT.EDU. failed");
}

#[tokio::test]
async fn failed_address_zone_transfer_should_be_fatal() {
    let directory: FakeDirectory = FakeDirectory::default();
    let cfg: Config = Config::default();
    let result = HostTableService::new(&directory, &cfg).load_catalog().await;
    assert!(result.is_err());
}
