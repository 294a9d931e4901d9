strong_type!(FsId, u32);
strong_type!(InodeId, u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_id_conversions() {
        let id: FsId = 7u32.into();
        assert_eq!(*id, 7);
        let raw: u32 = id.into();
        assert_eq!(raw, 7);
        assert_eq!(format!("{}", id), "7");
        assert_eq!(format!("{:?}", id), "FsId(7)");
    }

    #[test]
    fn test_inode_id_serde_is_transparent() {
        let id = InodeId(1);
        assert_eq!(serde_json::to_string(&id).unwrap(), "1");
        let parsed: InodeId = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, InodeId(42));
    }
}
