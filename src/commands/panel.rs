// panel.rs - Host Resource Report Module (owner only)
// Samples memory, cpu and disk usage of the machine hosting the bot and
// renders one field per stat. Every invocation reads fresh values; nothing
// is cached or aggregated over time.
//
// Used by: main.rs (command registration)

use serenity::{
    client::Context,
    framework::standard::{macros::command, macros::group, CommandResult},
    model::channel::Message,
};
use std::env;
use std::path::{Path, PathBuf};
use sysinfo::{
    CpuRefreshKind, Disks, MemoryRefreshKind, RefreshKind, System, MINIMUM_CPU_UPDATE_INTERVAL,
};

use crate::commands::checks::OWNER_CHECK;
use crate::embed::add_mapped_fields;

const MB: f64 = (1024 * 1024) as f64;

/// One point-in-time reading of the host's memory, cpu and disk usage.
#[derive(Debug, Clone, Copy)]
pub struct HostMetricsSample {
    pub ram_percent: f64,
    pub ram_total_gb: f64,
    pub cpu_percent: f64,
    pub cpu_current_ghz: f64,
    pub cpu_max_ghz: f64,
    pub disk_percent: f64,
    pub disk_total_mb: f64,
}

/// Pick the volume whose mount point is the longest prefix of `path`,
/// returning its (total, available) bytes.
pub(crate) fn pick_volume(mounts: &[(PathBuf, u64, u64)], path: &Path) -> Option<(u64, u64)> {
    mounts
        .iter()
        .filter(|(mount, _, _)| path.starts_with(mount))
        .max_by_key(|(mount, _, _)| mount.as_os_str().len())
        .map(|(_, total, available)| (*total, *available))
}

pub(crate) fn percent_used(used: f64, total: f64) -> f64 {
    if total > 0.0 {
        100.0 * used / total
    } else {
        0.0
    }
}

/// Sample the host. Cpu usage needs two refreshes a short interval apart,
/// so this suspends for sysinfo's minimum update interval in between.
pub async fn sample_host_metrics() -> HostMetricsSample {
    let mut sys = System::new_with_specifics(
        RefreshKind::nothing()
            .with_memory(MemoryRefreshKind::everything())
            .with_cpu(CpuRefreshKind::everything()),
    );

    tokio::time::sleep(MINIMUM_CPU_UPDATE_INTERVAL).await;
    sys.refresh_cpu_usage();

    let ram_percent = percent_used(sys.used_memory() as f64, sys.total_memory() as f64);
    let ram_total_gb = sys.total_memory() as f64 / MB / 1000.0;

    let cpu_percent = f64::from(sys.global_cpu_usage());
    let cpu_current_ghz = sys
        .cpus()
        .first()
        .map_or(0.0, |cpu| cpu.frequency() as f64 / 1000.0);
    let cpu_max_ghz = sys
        .cpus()
        .iter()
        .map(|cpu| cpu.frequency())
        .max()
        .unwrap_or(0) as f64
        / 1000.0;

    let disks = Disks::new_with_refreshed_list();
    let mounts: Vec<(PathBuf, u64, u64)> = disks
        .iter()
        .map(|disk| {
            (
                disk.mount_point().to_path_buf(),
                disk.total_space(),
                disk.available_space(),
            )
        })
        .collect();
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
    let (disk_percent, disk_total_mb) = match pick_volume(&mounts, &cwd) {
        Some((total, available)) if total > 0 => (
            percent_used((total - available) as f64, total as f64),
            total as f64 / MB,
        ),
        _ => (0.0, 0.0),
    };

    HostMetricsSample {
        ram_percent,
        ram_total_gb,
        cpu_percent,
        cpu_current_ghz,
        cpu_max_ghz,
        disk_percent,
        disk_total_mb,
    }
}

/// Percentage line plus magnitude-with-unit line, shared by all three stats.
pub(crate) fn stat_body(percent: f64, magnitude: &str, unit: &str) -> String {
    format!("> `{:.3}` **%**\n- `{}` **{}**", percent, magnitude, unit)
}

fn stat_entries(sample: &HostMetricsSample) -> Vec<(&'static str, (f64, String, &'static str))> {
    vec![
        (
            "ram",
            (
                sample.ram_percent,
                format!("{:.3}", sample.ram_total_gb),
                "Gb",
            ),
        ),
        (
            "cpu",
            (
                sample.cpu_percent,
                format!("{:.1}`/`{:.1}", sample.cpu_current_ghz, sample.cpu_max_ghz),
                "Ghz",
            ),
        ),
        (
            "disk",
            (
                sample.disk_percent,
                format!("{:.0}", sample.disk_total_mb),
                "Mb",
            ),
        ),
    ]
}

#[command]
#[aliases("pan")]
#[checks(Owner)]
/// Report the host's memory, cpu and disk usage. The Owner check runs
/// before this body, so non-owners never trigger a metrics read.
pub async fn panel(ctx: &Context, msg: &Message) -> CommandResult {
    let sample = sample_host_metrics().await;

    msg.channel_id
        .send_message(&ctx.http, |m| {
            m.embed(|e| {
                e.title("Server Report");
                e.description("Point-in-time usage of the machine hosting the bot.");
                add_mapped_fields(
                    e,
                    stat_entries(&sample),
                    |name| name.to_uppercase(),
                    |stat: &(f64, String, &'static str)| stat_body(stat.0, &stat.1, stat.2),
                    true,
                )
            })
        })
        .await?;

    Ok(())
}

#[group]
#[commands(panel)]
pub struct PanelCog;
