//! # State Classification
//!
//! Classifies a manga's download and read progress from the aggregate
//! counters the backend keeps, without enumerating its chapters.
//!
//! ```text
//! downloadCount == 0                       → NotDownloaded
//! downloadCount == chapters.totalCount     → FullyDownloaded
//! otherwise                                → PartiallyDownloaded
//!
//! unreadCount == chapters.totalCount       → Unread
//! unreadCount == 0                         → FullyRead
//! otherwise                                → PartiallyRead
//! ```
//!
//! The first matching row wins, so a manga with no chapters at all is
//! `NotDownloaded` and `Unread`. Each triple is a partition.

use crate::backend::Manga;

/// Counters needed for download classification.
pub trait DownloadInfo {
    fn download_count(&self) -> u32;
    fn total_chapters(&self) -> u32;
}

/// Counters needed for read classification.
pub trait UnreadInfo {
    fn unread_count(&self) -> u32;
    fn total_chapters(&self) -> u32;
}

impl DownloadInfo for Manga {
    fn download_count(&self) -> u32 {
        self.download_count
    }

    fn total_chapters(&self) -> u32 {
        self.chapters.total_count
    }
}

impl UnreadInfo for Manga {
    fn unread_count(&self) -> u32 {
        self.unread_count
    }

    fn total_chapters(&self) -> u32 {
        self.chapters.total_count
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadState {
    NotDownloaded,
    PartiallyDownloaded,
    FullyDownloaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadState {
    Unread,
    PartiallyRead,
    FullyRead,
}

pub fn download_state<M: DownloadInfo + ?Sized>(manga: &M) -> DownloadState {
    if manga.download_count() == 0 {
        DownloadState::NotDownloaded
    } else if manga.download_count() == manga.total_chapters() {
        DownloadState::FullyDownloaded
    } else {
        DownloadState::PartiallyDownloaded
    }
}

pub fn read_state<M: UnreadInfo + ?Sized>(manga: &M) -> ReadState {
    if manga.unread_count() == manga.total_chapters() {
        ReadState::Unread
    } else if manga.unread_count() == 0 {
        ReadState::FullyRead
    } else {
        ReadState::PartiallyRead
    }
}

pub fn is_not_downloaded<M: DownloadInfo + ?Sized>(manga: &M) -> bool {
    download_state(manga) == DownloadState::NotDownloaded
}

pub fn is_fully_downloaded<M: DownloadInfo + ?Sized>(manga: &M) -> bool {
    download_state(manga) == DownloadState::FullyDownloaded
}

pub fn is_partially_downloaded<M: DownloadInfo + ?Sized>(manga: &M) -> bool {
    download_state(manga) == DownloadState::PartiallyDownloaded
}

pub fn is_unread<M: UnreadInfo + ?Sized>(manga: &M) -> bool {
    read_state(manga) == ReadState::Unread
}

pub fn is_fully_read<M: UnreadInfo + ?Sized>(manga: &M) -> bool {
    read_state(manga) == ReadState::FullyRead
}

pub fn is_partially_read<M: UnreadInfo + ?Sized>(manga: &M) -> bool {
    read_state(manga) == ReadState::PartiallyRead
}

fn select<M>(mangas: &[M], predicate: impl Fn(&M) -> bool) -> Vec<&M> {
    mangas.iter().filter(|manga| predicate(*manga)).collect()
}

pub fn not_downloaded<M: DownloadInfo>(mangas: &[M]) -> Vec<&M> {
    select(mangas, is_not_downloaded)
}

pub fn fully_downloaded<M: DownloadInfo>(mangas: &[M]) -> Vec<&M> {
    select(mangas, is_fully_downloaded)
}

pub fn partially_downloaded<M: DownloadInfo>(mangas: &[M]) -> Vec<&M> {
    select(mangas, is_partially_downloaded)
}

pub fn unread<M: UnreadInfo>(mangas: &[M]) -> Vec<&M> {
    select(mangas, is_unread)
}

pub fn fully_read<M: UnreadInfo>(mangas: &[M]) -> Vec<&M> {
    select(mangas, is_fully_read)
}

pub fn partially_read<M: UnreadInfo>(mangas: &[M]) -> Vec<&M> {
    select(mangas, is_partially_read)
}
