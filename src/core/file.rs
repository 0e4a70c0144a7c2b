//! Top-level Cast container.

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Write};
use std::path::Path;

use super::builder::NodeBuilder;
use super::cursor::NodeRef;
use super::hash::HashAllocator;
use super::node::{Node, NodeKind};
use crate::codec::{read_file_header, write_file_header, FileHeader, CURRENT_VERSION, FILE_HEADER_SIZE};
use crate::util::{Error, Result};

/// A decoded or programmatically built Cast file.
///
/// Owns every node through its roots, and the allocator that hands out
/// hashes for nodes created on it.
#[derive(Clone, Debug, PartialEq)]
pub struct CastFile {
    version: u32,
    flags: u32,
    roots: Vec<Node>,
    hashes: HashAllocator,
}

impl Default for CastFile {
    fn default() -> Self {
        Self::new()
    }
}

impl CastFile {
    /// Empty file at the current version with no flags.
    pub fn new() -> Self {
        Self {
            version: CURRENT_VERSION,
            flags: 0,
            roots: Vec::new(),
            hashes: HashAllocator::new(),
        }
    }

    #[inline]
    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn set_version(&mut self, version: u32) -> &mut Self {
        self.version = version;
        self
    }

    #[inline]
    pub fn flags(&self) -> u32 {
        self.flags
    }

    pub fn set_flags(&mut self, flags: u32) -> &mut Self {
        self.flags = flags;
        self
    }

    #[inline]
    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    #[inline]
    pub fn roots_mut(&mut self) -> &mut [Node] {
        &mut self.roots
    }

    /// Cursor at root `index`.
    pub fn root(&self, index: usize) -> Option<NodeRef<'_>> {
        self.roots.get(index).map(NodeRef::root)
    }

    /// Cursors at every root.
    pub fn root_refs(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        self.roots.iter().map(NodeRef::root)
    }

    /// The allocator used for nodes created on this file.
    #[inline]
    pub fn hashes(&self) -> &HashAllocator {
        &self.hashes
    }

    /// Append a new root node and return a builder for it.
    pub fn create_root(&mut self) -> NodeBuilder<'_> {
        let root = Node::new(NodeKind::Root, &mut self.hashes);
        self.roots.push(root);
        let last = self.roots.len() - 1;
        NodeBuilder::new(&mut self.roots[last], &mut self.hashes)
    }

    /// Builder for an existing root, sharing this file's allocator.
    pub fn root_builder(&mut self, index: usize) -> Option<NodeBuilder<'_>> {
        let root = self.roots.get_mut(index)?;
        Some(NodeBuilder::new(root, &mut self.hashes))
    }

    /// Append an already built root. Its hashes are reserved.
    pub fn push_root(&mut self, root: Node) -> &mut Node {
        reserve_all(&mut self.hashes, &root);
        self.roots.push(root);
        let last = self.roots.len() - 1;
        &mut self.roots[last]
    }

    /// Total number of nodes under all roots.
    pub fn num_nodes(&self) -> usize {
        self.roots.iter().map(Node::subtree_len).sum()
    }

    /// Encoded size of the whole file.
    pub fn size(&self) -> usize {
        FILE_HEADER_SIZE + self.roots.iter().map(Node::size).sum::<usize>()
    }

    /// Decoded nodes whose stored size disagrees with the recomputed one,
    /// as `(hash, stored, recomputed)`.
    pub fn size_mismatches(&self) -> Vec<(u64, u32, usize)> {
        self.roots.iter().flat_map(Node::size_mismatches).collect()
    }

    // ------------------------------------------------------------------
    // Binary
    // ------------------------------------------------------------------

    /// Decode a whole file. Any error aborts the decode.
    #[tracing::instrument(skip_all)]
    pub fn decode<R: Read>(r: &mut R) -> Result<Self> {
        let header = read_file_header(r)?;
        tracing::debug!(
            version = header.version,
            roots = header.root_count,
            flags = header.flags,
            "decoding cast file"
        );

        let mut roots = Vec::with_capacity((header.root_count as usize).min(1024));
        for _ in 0..header.root_count {
            roots.push(Node::decode(r)?);
        }

        let mut hashes = HashAllocator::new();
        for root in &roots {
            reserve_all(&mut hashes, root);
        }

        Ok(Self {
            version: header.version,
            flags: header.flags,
            roots,
            hashes,
        })
    }

    /// Decode from an in-memory buffer.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::decode(&mut Cursor::new(bytes))
    }

    /// Encode the whole file.
    #[tracing::instrument(skip_all)]
    pub fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        let header = FileHeader {
            version: self.version,
            root_count: u32::try_from(self.roots.len())
                .map_err(|_| Error::invalid("too many root nodes"))?,
            flags: self.flags,
        };
        tracing::debug!(version = header.version, roots = header.root_count, "encoding cast file");

        write_file_header(w, &header)?;
        for root in &self.roots {
            root.encode(w)?;
        }
        Ok(())
    }

    /// Encode into a new buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.size());
        self.encode(&mut buf)?;
        Ok(buf)
    }

    // ------------------------------------------------------------------
    // Files
    // ------------------------------------------------------------------

    /// Open and decode a file, memory-mapped when the `mmap` feature is on.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_opts(path, cfg!(feature = "mmap"))
    }

    /// Open and decode a file, choosing memory mapping or buffered reads.
    pub fn open_opts(path: impl AsRef<Path>, use_mmap: bool) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound(path.to_path_buf())
            } else {
                Error::Io(e)
            }
        })?;
        tracing::debug!(path = %path.display(), use_mmap, "opening cast file");

        if use_mmap {
            #[cfg(feature = "mmap")]
            {
                if file.metadata()?.len() > 0 {
                    // Safety: the map is read-only and dropped before returning
                    let mmap = unsafe { memmap2::Mmap::map(&file) }
                        .map_err(|e| Error::MmapFailed(e.to_string()))?;
                    return Self::from_bytes(&mmap);
                }
            }
            #[cfg(not(feature = "mmap"))]
            {
                tracing::debug!("mmap feature disabled, using buffered reads");
            }
        }

        Self::decode(&mut BufReader::new(file))
    }

    /// Encode to a file, replacing it if it exists.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut w = BufWriter::new(File::create(path.as_ref())?);
        self.encode(&mut w)?;
        w.flush()?;
        Ok(())
    }
}

fn reserve_all(hashes: &mut HashAllocator, node: &Node) {
    node.visit(&mut |n, _| hashes.reserve(n.hash()));
}
