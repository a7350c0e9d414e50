use clap::Parser;
use ytgrab::domain::value_objects::Itag;
use ytgrab::presentation::{Cli, Commands};

#[test]
fn parse_multiple_sources_defaults() {
    let cli = Cli::parse_from(["ytgrab", "dQw4w9WgXcQ", "https://youtu.be/abc"]);
    assert_eq!(cli.fuentes, vec!["dQw4w9WgXcQ", "https://youtu.be/abc"]);
    assert!(cli.itag.is_none());
    assert!(!cli.solo_audio);
    assert!(!cli.mp3);
    assert!(cli.command.is_none());
}

#[test]
fn parse_itag_and_mp3() {
    let cli = Cli::parse_from(["ytgrab", "-i", "140", "--mp3", "dQw4w9WgXcQ"]);
    assert_eq!(cli.itag, Some(Itag::new(140)));
    assert!(cli.mp3);
}

#[test]
fn parse_invalid_itag_fails() {
    let result = Cli::try_parse_from(["ytgrab", "--itag", "abc", "dQw4w9WgXcQ"]);
    assert!(result.is_err());
}

#[test]
fn parse_output_filename_and_audio_only() {
    let cli = Cli::parse_from([
        "ytgrab",
        "-a",
        "-o",
        "~/Musica",
        "-f",
        "mi cancion",
        "dQw4w9WgXcQ",
    ]);
    assert!(cli.solo_audio);
    assert_eq!(cli.output.as_deref(), Some("~/Musica"));
    assert_eq!(cli.nombre.as_deref(), Some("mi cancion"));
}

#[test]
fn parse_repeated_proxies() {
    let cli = Cli::parse_from([
        "ytgrab",
        "--proxy",
        "http=http://127.0.0.1:3128",
        "--proxy",
        "https=http://127.0.0.1:3129",
        "dQw4w9WgXcQ",
    ]);
    assert_eq!(cli.proxies.len(), 2);
}

#[test]
fn parse_streams_subcommand() {
    let cli = Cli::parse_from(["ytgrab", "streams", "dQw4w9WgXcQ"]);
    match cli.command {
        Some(Commands::Streams { source }) => assert_eq!(source, "dQw4w9WgXcQ"),
        _ => panic!("Se esperaba subcomando streams"),
    }
}

#[test]
fn parse_tool_paths_global() {
    let cli = Cli::parse_from([
        "ytgrab",
        "streams",
        "dQw4w9WgXcQ",
        "--ffmpeg-path",
        "/tmp/ffmpeg",
        "--ytdlp-path",
        "/tmp/yt-dlp",
    ]);
    assert_eq!(cli.ffmpeg_path.as_deref(), Some("/tmp/ffmpeg"));
    assert_eq!(cli.ytdlp_path.as_deref(), Some("/tmp/yt-dlp"));
}

#[test]
fn parse_list_and_keep_flags() {
    let cli = Cli::parse_from(["ytgrab", "dQw4w9WgXcQ", "-l", "--keep-on-failure", "-q"]);
    assert!(cli.listar);
    assert!(cli.conservar_si_falla);
    assert!(cli.silencioso);
}
